//! Semantic meaning of a which-id, chosen independently of its payload shape.
//!
//! The same `UInt` decoder backs underline, strike-through, relief and many
//! more ids; the [`Effect`] registered next to the decoder says which
//! projection onto style state the decoded number gets.

/// Script slot of a script-dependent character attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    Asian,
    Complex,
}

impl Script {
    /// Property name for this script: `base` for Latin, `alt` with the
    /// script suffix otherwise (`fo:font-weight` / `style:font-weight-asian`).
    pub fn key(self, base: &'static str, alt: &'static str) -> String {
        match self {
            Script::Latin => base.to_string(),
            Script::Asian => format!("{}-asian", alt),
            Script::Complex => format!("{}-complex", alt),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharEffect {
    CaseMap,
    Color,
    Contour,
    CrossedOut,
    Escapement,
    Font(Script),
    FontSize(Script),
    Kerning,
    Language(Script),
    Posture(Script),
    ProportionalSize,
    Shadowed,
    Underline,
    Weight(Script),
    WordLineMode,
    AutoKern,
    Blink,
    NoHyphen,
    Background,
    Rotate,
    EmphasisMark,
    TwoLines,
    ScaleWidth,
    Relief,
    Hidden,
    /// Named character style
    CharFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParaEffect {
    LineSpacing,
    Adjust,
    Split,
    Orphans,
    Widows,
    Tabs,
    HyphenZone,
    DropCaps,
    Register,
    NumRule,
    ScriptSpace,
    HangingPunctuation,
    ForbiddenRules,
    VertAlign,
    SnapToGrid,
    ConnectBorder,
    WritingDirection,
    OutlineLevel,
}

/// Frame attributes; the spacing, border, background and shadow variants
/// go to the state's current target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEffect {
    Size,
    LRSpace,
    ULSpace,
    Break,
    Print,
    Opaque,
    Protect,
    Surround,
    VertOrient,
    HoriOrient,
    Anchor,
    Background,
    Box,
    Shadow,
    Keep,
    EditInReadonly,
    LayoutSplit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicEffect {
    Mirror,
    Crop,
    Rotation,
    Luminance,
    Contrast,
    Channel(char),
    Gamma,
    Invert,
    Transparency,
    DrawMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEffect {
    HorJustify,
    Indent,
    VerJustify,
    Orientation,
    RotateValue,
    LineBreak,
    Margin,
    Merge,
    ValueFormat,
    Protection,
    PageSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEffect {
    DataDescription,
    ShowSymbol,
    LegendPosition,
    TextOrientation,
    /// Automatic axis value: `true` removes the explicit property
    AxisAuto(&'static str),
    /// Explicit axis value
    AxisValue(&'static str),
    Logarithmic,
    MeanValue,
    ErrorKind,
    ErrorPercent,
    /// Boolean chart style flag under the given property name
    StyleFlag(&'static str),
    SymbolSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawEffect {
    LineStyle,
    LineDash,
    LineWidth,
    LineColor,
    LineStartWidth,
    LineEndWidth,
    LineTransparence,
    LineJoint,
    FillStyle,
    FillColor,
    FillGradient,
    FillTransparence,
    Shadow,
    ShadowColor,
    ShadowXDist,
    ShadowYDist,
    ShadowTransparence,
    TextMinFrameHeight,
    TextAutoGrowHeight,
    /// Text-frame padding on the given side
    TextDistance(&'static str),
    TextVertAdjust,
    TextHorzAdjust,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene3dEffect {
    PercentDiagonal,
    BackScale,
    Depth,
    HorizontalSegments,
    VerticalSegments,
    EndAngle,
    DoubleSided,
    NormalsKind,
    Perspective,
    Distance,
    FocalLength,
    TwoSidedLighting,
    /// Colour of light 1..=8
    LightColor(u8),
    AmbientColor,
    /// Switch of light 1..=8
    LightOn(u8),
    ShadowSlant,
    ShadeMode,
}

/// What applying an attribute does to a style state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Char(CharEffect),
    Para(ParaEffect),
    Frame(FrameEffect),
    Graphic(GraphicEffect),
    Cell(CellEffect),
    Chart(ChartEffect),
    Draw(DrawEffect),
    Scene3d(Scene3dEffect),
    /// Apply every item of a nested set
    NestedSet,
    /// Carries content for the listener only
    Content,
    /// Decoded and kept, without a style projection
    None,
}
