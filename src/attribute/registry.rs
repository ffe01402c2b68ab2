//! Attribute registry.
//!
//! Built once, on first use, and shared read-only afterwards. Every known
//! `(family, which)` pair maps to its debug name, payload decoder, apply
//! effect and prototype default.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::decode::Decoder as D;
use super::effect::{
    CellEffect as Cell, CharEffect as C, ChartEffect as Ch, DrawEffect as Dr, Effect as E,
    FrameEffect as F, GraphicEffect as G, ParaEffect as P, Scene3dEffect as S3, Script,
};
use super::schema;
use super::value::AttributeValue;
use super::which::*;
use super::{Attribute, AttributeKey, PoolFamily};

/// Registered behaviour of one which-id.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    pub key: AttributeKey,
    pub name: &'static str,
    pub decoder: D,
    pub effect: E,
    /// Value of the prototype
    pub default: AttributeValue,
}

/// Table of attribute prototypes.
pub struct Registry {
    specs: HashMap<AttributeKey, AttributeSpec>,
}

impl Registry {
    fn new() -> Self {
        Self {
            specs: HashMap::with_capacity(320),
        }
    }

    /// Register a which-id whose prototype holds the decoder's default.
    fn add(&mut self, key: AttributeKey, name: &'static str, decoder: D, effect: E) {
        let default = decoder.default_value();
        self.add_default(key, name, decoder, effect, default);
    }

    fn add_default(
        &mut self,
        key: AttributeKey,
        name: &'static str,
        decoder: D,
        effect: E,
        default: AttributeValue,
    ) {
        self.specs.insert(
            key,
            AttributeSpec {
                key,
                name,
                decoder,
                effect,
                default,
            },
        );
    }

    /// Look up a which-id.
    pub fn spec(&self, key: AttributeKey) -> Option<&AttributeSpec> {
        self.specs.get(&key)
    }

    /// Fresh copy of the prototype for `key`.
    pub fn create(&self, key: AttributeKey) -> Option<Attribute> {
        self.spec(key).map(|spec| Attribute {
            key,
            name: spec.name,
            value: spec.default.clone(),
        })
    }

    pub fn contains(&self, key: AttributeKey) -> bool {
        self.specs.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.specs.values()
    }

    /// Registered specs of one family, sorted by which-id.
    pub fn family(&self, family: PoolFamily) -> Vec<&AttributeSpec> {
        let mut specs: Vec<_> = self
            .specs
            .values()
            .filter(|spec| spec.key.family == family)
            .collect();
        specs.sort_by_key(|spec| spec.key.which);
        specs
    }
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let mut registry = Registry::new();
    register_writer_character(&mut registry);
    register_writer_text(&mut registry);
    register_writer_paragraph(&mut registry);
    register_writer_frame(&mut registry);
    register_writer_graphic(&mut registry);
    register_edit_engine(&mut registry);
    register_calc(&mut registry);
    register_chart(&mut registry);
    register_draw(&mut registry);
    register_scene3d(&mut registry);
    registry
});

/// The process-wide attribute registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

const fn writer(which: u16) -> AttributeKey {
    AttributeKey::writer(which)
}

fn register_writer_character(r: &mut Registry) {
    r.add(writer(RES_CHRATR_CASEMAP), "CharCaseMap", D::U8, E::Char(C::CaseMap));
    r.add(writer(RES_CHRATR_CHARSETCOLOR), "CharCharsetColor", D::Color, E::None);
    r.add(writer(RES_CHRATR_COLOR), "CharColor", D::Color, E::Char(C::Color));
    r.add(writer(RES_CHRATR_CONTOUR), "CharContour", D::Bool, E::Char(C::Contour));
    r.add(writer(RES_CHRATR_CROSSEDOUT), "CharCrossedOut", D::U8, E::Char(C::CrossedOut));
    r.add(writer(RES_CHRATR_ESCAPEMENT), "CharEscapement", D::Escapement, E::Char(C::Escapement));
    r.add(writer(RES_CHRATR_FONT), "CharFont", D::Font, E::Char(C::Font(Script::Latin)));
    r.add(
        writer(RES_CHRATR_FONTSIZE),
        "CharFontSize",
        D::Record(&schema::FONT_HEIGHT),
        E::Char(C::FontSize(Script::Latin)),
    );
    r.add(writer(RES_CHRATR_KERNING), "CharKerning", D::I16, E::Char(C::Kerning));
    r.add(writer(RES_CHRATR_LANGUAGE), "CharLanguage", D::U16, E::Char(C::Language(Script::Latin)));
    r.add(writer(RES_CHRATR_POSTURE), "CharPosture", D::U8, E::Char(C::Posture(Script::Latin)));
    r.add_default(
        writer(RES_CHRATR_PROPORTIONALFONTSIZE),
        "CharPropFontSize",
        D::U16,
        E::Char(C::ProportionalSize),
        AttributeValue::UInt(100),
    );
    r.add(writer(RES_CHRATR_SHADOWED), "CharShadowed", D::Bool, E::Char(C::Shadowed));
    r.add(writer(RES_CHRATR_UNDERLINE), "CharUnderline", D::U8, E::Char(C::Underline));
    r.add(writer(RES_CHRATR_WEIGHT), "CharWeight", D::U8, E::Char(C::Weight(Script::Latin)));
    r.add(writer(RES_CHRATR_WORDLINEMODE), "CharWordLineMode", D::Bool, E::Char(C::WordLineMode));
    r.add(writer(RES_CHRATR_AUTOKERN), "CharAutoKern", D::Bool, E::Char(C::AutoKern));
    r.add(writer(RES_CHRATR_BLINK), "CharBlink", D::Bool, E::Char(C::Blink));
    r.add(writer(RES_CHRATR_NOHYPHEN), "CharNoHyphen", D::Bool, E::Char(C::NoHyphen));
    r.add(writer(RES_CHRATR_NOLINEBREAK), "CharNoLineBreak", D::Bool, E::None);
    r.add(writer(RES_CHRATR_BACKGROUND), "CharBackground", D::Brush, E::Char(C::Background));

    for (which, script, prefix) in [
        (RES_CHRATR_CJK_FONT, Script::Asian, 0),
        (RES_CHRATR_CTL_FONT, Script::Complex, 1),
    ] {
        let names = [
            ["CharCJKFont", "CharCJKFontSize", "CharCJKLanguage", "CharCJKPosture", "CharCJKWeight"],
            ["CharCTLFont", "CharCTLFontSize", "CharCTLLanguage", "CharCTLPosture", "CharCTLWeight"],
        ][prefix];
        r.add(writer(which), names[0], D::Font, E::Char(C::Font(script)));
        r.add(
            writer(which + 1),
            names[1],
            D::Record(&schema::FONT_HEIGHT),
            E::Char(C::FontSize(script)),
        );
        r.add(writer(which + 2), names[2], D::U16, E::Char(C::Language(script)));
        r.add(writer(which + 3), names[3], D::U8, E::Char(C::Posture(script)));
        r.add(writer(which + 4), names[4], D::U8, E::Char(C::Weight(script)));
    }

    r.add(writer(RES_CHRATR_ROTATE), "CharRotate", D::Record(&schema::ROTATE), E::Char(C::Rotate));
    r.add(writer(RES_CHRATR_EMPHASIS_MARK), "CharEmphasisMark", D::U16, E::Char(C::EmphasisMark));
    r.add(
        writer(RES_CHRATR_TWO_LINES),
        "CharTwoLines",
        D::Record(&schema::TWO_LINES),
        E::Char(C::TwoLines),
    );
    r.add_default(
        writer(RES_CHRATR_SCALEW),
        "CharScaleWidth",
        D::U16,
        E::Char(C::ScaleWidth),
        AttributeValue::UInt(100),
    );
    r.add(writer(RES_CHRATR_RELIEF), "CharRelief", D::U16, E::Char(C::Relief));
    r.add(writer(RES_CHRATR_HIDDEN), "CharHidden", D::Bool, E::Char(C::Hidden));
}

fn register_writer_text(r: &mut Registry) {
    r.add(writer(RES_TXTATR_INETFMT), "TextINetFormat", D::InetFormat, E::Content);
    r.add(writer(RES_TXTATR_REFMARK), "TextRefMark", D::RefMark, E::Content);
    r.add(writer(RES_TXTATR_TOXMARK), "TextTOXMark", D::Opaque, E::None);
    r.add(writer(RES_TXTATR_CHARFMT), "TextCharFormat", D::CharFormat, E::Char(C::CharFormat));
    r.add(writer(RES_TXTATR_CJK_RUBY), "TextCJKRuby", D::Opaque, E::None);
    r.add(writer(RES_TXTATR_UNKNOWN_CONTAINER), "TextUnknownContainer", D::Opaque, E::None);
    r.add(writer(RES_TXTATR_FIELD), "TextField", D::Field, E::Content);
    r.add(writer(RES_TXTATR_FLYCNT), "TextFlyContent", D::FlyContent, E::Content);
    r.add(writer(RES_TXTATR_FTN), "TextFootnote", D::Footnote, E::Content);
    r.add(writer(RES_TXTATR_SOFTHYPH), "TextSoftHyphen", D::Void, E::Content);
    r.add(writer(RES_TXTATR_HARDBLANK), "TextHardBlank", D::HardBlank, E::Content);
}

fn register_writer_paragraph(r: &mut Registry) {
    r.add(
        writer(RES_PARATR_LINESPACING),
        "ParaLineSpacing",
        D::Record(&schema::LINE_SPACING),
        E::Para(P::LineSpacing),
    );
    r.add(writer(RES_PARATR_ADJUST), "ParaAdjust", D::Record(&schema::ADJUST), E::Para(P::Adjust));
    r.add_default(
        writer(RES_PARATR_SPLIT),
        "ParaSplit",
        D::Bool,
        E::Para(P::Split),
        AttributeValue::Bool(true),
    );
    r.add(writer(RES_PARATR_ORPHANS), "ParaOrphans", D::U8, E::Para(P::Orphans));
    r.add(writer(RES_PARATR_WIDOWS), "ParaWidows", D::U8, E::Para(P::Widows));
    r.add(writer(RES_PARATR_TABSTOP), "ParaTabStops", D::Tabs, E::Para(P::Tabs));
    r.add(
        writer(RES_PARATR_HYPHENZONE),
        "ParaHyphenZone",
        D::Record(&schema::HYPHEN_ZONE),
        E::Para(P::HyphenZone),
    );
    r.add(writer(RES_PARATR_DROP), "ParaDropCaps", D::Record(&schema::DROP_CAPS), E::Para(P::DropCaps));
    r.add(writer(RES_PARATR_REGISTER), "ParaRegister", D::Bool, E::Para(P::Register));
    r.add(writer(RES_PARATR_NUMRULE), "ParaNumRule", D::Text, E::Para(P::NumRule));
    r.add(writer(RES_PARATR_SCRIPTSPACE), "ParaScriptSpace", D::Bool, E::Para(P::ScriptSpace));
    for (which, name, effect) in [
        (RES_PARATR_HANGINGPUNCTUATION, "ParaHangingPunctuation", P::HangingPunctuation),
        (RES_PARATR_FORBIDDEN_RULES, "ParaForbiddenRules", P::ForbiddenRules),
        (RES_PARATR_SNAPTOGRID, "ParaSnapToGrid", P::SnapToGrid),
        (RES_PARATR_CONNECT_BORDER, "ParaConnectBorder", P::ConnectBorder),
    ] {
        r.add_default(writer(which), name, D::Bool, E::Para(effect), AttributeValue::Bool(true));
    }
    r.add(writer(RES_PARATR_VERTALIGN), "ParaVertAlign", D::U16, E::Para(P::VertAlign));
}

fn register_writer_frame(r: &mut Registry) {
    r.add(writer(RES_FILL_ORDER), "FrameFillOrder", D::U8, E::None);
    r.add(writer(RES_FRM_SIZE), "FrameSize", D::Record(&schema::FRAME_SIZE), E::Frame(F::Size));
    r.add(writer(RES_PAPER_BIN), "FramePaperBin", D::U8, E::None);
    r.add(writer(RES_LR_SPACE), "FrameLRSpace", D::Record(&schema::LR_SPACE), E::Frame(F::LRSpace));
    r.add(writer(RES_UL_SPACE), "FrameULSpace", D::Record(&schema::UL_SPACE), E::Frame(F::ULSpace));
    r.add(writer(RES_PAGEDESC), "FramePageDesc", D::Opaque, E::None);
    r.add(writer(RES_BREAK), "FrameBreak", D::U8, E::Frame(F::Break));
    r.add(writer(RES_CNTNT), "FrameContent", D::Content, E::Content);
    r.add(writer(RES_HEADER), "FrameHeader", D::Opaque, E::None);
    r.add(writer(RES_FOOTER), "FrameFooter", D::Opaque, E::None);
    r.add_default(writer(RES_PRINT), "FramePrint", D::Bool, E::Frame(F::Print), AttributeValue::Bool(true));
    r.add_default(writer(RES_OPAQUE), "FrameOpaque", D::Bool, E::Frame(F::Opaque), AttributeValue::Bool(true));
    r.add(writer(RES_PROTECT), "FrameProtect", D::Record(&schema::FRAME_PROTECT), E::Frame(F::Protect));
    r.add(writer(RES_SURROUND), "FrameSurround", D::Record(&schema::SURROUND), E::Frame(F::Surround));
    r.add(
        writer(RES_VERT_ORIENT),
        "FrameVertOrient",
        D::Record(&schema::VERT_ORIENT),
        E::Frame(F::VertOrient),
    );
    r.add(
        writer(RES_HORI_ORIENT),
        "FrameHoriOrient",
        D::Record(&schema::HORI_ORIENT),
        E::Frame(F::HoriOrient),
    );
    r.add(writer(RES_ANCHOR), "FrameAnchor", D::Record(&schema::ANCHOR), E::Frame(F::Anchor));
    r.add(writer(RES_BACKGROUND), "FrameBackground", D::Brush, E::Frame(F::Background));
    r.add(writer(RES_BOX), "FrameBox", D::Box, E::Frame(F::Box));
    r.add(writer(RES_SHADOW), "FrameShadow", D::Record(&schema::SHADOW), E::Frame(F::Shadow));
    r.add(writer(RES_FRMMACRO), "FrameMacro", D::Opaque, E::None);
    r.add(writer(RES_COL), "FrameColumns", D::Opaque, E::None);
    r.add(writer(RES_KEEP), "FrameKeep", D::Bool, E::Frame(F::Keep));
    r.add(writer(RES_URL), "FrameURL", D::Opaque, E::None);
    r.add(writer(RES_EDIT_IN_READONLY), "FrameEditInReadonly", D::Bool, E::Frame(F::EditInReadonly));
    r.add_default(
        writer(RES_LAYOUT_SPLIT),
        "FrameLayoutSplit",
        D::Bool,
        E::Frame(F::LayoutSplit),
        AttributeValue::Bool(true),
    );

    r.add(writer(RES_BOXATR_FORMAT), "BoxFormat", D::U32, E::Cell(Cell::ValueFormat));
    r.add(writer(RES_BOXATR_FORMULA), "BoxFormula", D::Text, E::None);
    r.add(writer(RES_BOXATR_VALUE), "BoxValue", D::Double, E::None);
}

fn register_writer_graphic(r: &mut Registry) {
    r.add(writer(RES_GRFATR_MIRRORGRF), "GraphicMirror", D::U8, E::Graphic(G::Mirror));
    r.add(writer(RES_GRFATR_CROPGRF), "GraphicCrop", D::Record(&schema::CROP), E::Graphic(G::Crop));
    r.add(writer(RES_GRFATR_ROTATION), "GraphicRotation", D::U16, E::Graphic(G::Rotation));
    r.add(writer(RES_GRFATR_LUMINANCE), "GraphicLuminance", D::I16, E::Graphic(G::Luminance));
    r.add(writer(RES_GRFATR_CONTRAST), "GraphicContrast", D::I16, E::Graphic(G::Contrast));
    r.add(writer(RES_GRFATR_CHANNELR), "GraphicChannelR", D::I16, E::Graphic(G::Channel('r')));
    r.add(writer(RES_GRFATR_CHANNELG), "GraphicChannelG", D::I16, E::Graphic(G::Channel('g')));
    r.add(writer(RES_GRFATR_CHANNELB), "GraphicChannelB", D::I16, E::Graphic(G::Channel('b')));
    r.add_default(
        writer(RES_GRFATR_GAMMA),
        "GraphicGamma",
        D::Double,
        E::Graphic(G::Gamma),
        AttributeValue::Double(1.0),
    );
    r.add(writer(RES_GRFATR_INVERT), "GraphicInvert", D::Bool, E::Graphic(G::Invert));
    r.add(writer(RES_GRFATR_TRANSPARENCY), "GraphicTransparency", D::U8, E::Graphic(G::Transparency));
    r.add(writer(RES_GRFATR_DRAWMODE), "GraphicDrawMode", D::U16, E::Graphic(G::DrawMode));
}

fn register_edit_engine(r: &mut Registry) {
    let edit = AttributeKey::edit;
    r.add(edit(EE_PARA_WRITINGDIR), "EditWritingDir", D::U16, E::Para(P::WritingDirection));
    r.add(edit(EE_PARA_BULLETSTATE), "EditBulletState", D::Bool, E::None);
    r.add(edit(EE_PARA_OUTLLEVEL), "EditOutlineLevel", D::U16, E::Para(P::OutlineLevel));
    r.add(edit(EE_PARA_BULLET), "EditBullet", D::Opaque, E::None);
    r.add(edit(EE_PARA_LRSPACE), "EditLRSpace", D::Record(&schema::LR_SPACE), E::Frame(F::LRSpace));
    r.add(edit(EE_PARA_ULSPACE), "EditULSpace", D::Record(&schema::UL_SPACE), E::Frame(F::ULSpace));
    r.add(edit(EE_PARA_SBL), "EditLineSpacing", D::Record(&schema::LINE_SPACING), E::Para(P::LineSpacing));
    r.add(edit(EE_PARA_JUST), "EditAdjust", D::Record(&schema::ADJUST), E::Para(P::Adjust));
    r.add(edit(EE_PARA_TABS), "EditTabStops", D::Tabs, E::Para(P::Tabs));
    r.add(edit(EE_CHAR_COLOR), "EditColor", D::Color, E::Char(C::Color));
    r.add(edit(EE_CHAR_FONTINFO), "EditFont", D::Font, E::Char(C::Font(Script::Latin)));
    r.add(
        edit(EE_CHAR_FONTHEIGHT),
        "EditFontHeight",
        D::Record(&schema::FONT_HEIGHT),
        E::Char(C::FontSize(Script::Latin)),
    );
    r.add(edit(EE_CHAR_FONTWIDTH), "EditFontWidth", D::Opaque, E::None);
    r.add(edit(EE_CHAR_WEIGHT), "EditWeight", D::U8, E::Char(C::Weight(Script::Latin)));
    r.add(edit(EE_CHAR_UNDERLINE), "EditUnderline", D::U8, E::Char(C::Underline));
    r.add(edit(EE_CHAR_STRIKEOUT), "EditStrikeout", D::U8, E::Char(C::CrossedOut));
    r.add(edit(EE_CHAR_ITALIC), "EditItalic", D::U8, E::Char(C::Posture(Script::Latin)));
    r.add(edit(EE_CHAR_OUTLINE), "EditOutline", D::Bool, E::Char(C::Contour));
    r.add(edit(EE_CHAR_SHADOW), "EditShadow", D::Bool, E::Char(C::Shadowed));
    r.add(edit(EE_CHAR_ESCAPEMENT), "EditEscapement", D::Escapement, E::Char(C::Escapement));
    r.add(edit(EE_CHAR_PAIRKERNING), "EditPairKerning", D::Bool, E::Char(C::AutoKern));
    r.add(edit(EE_CHAR_KERNING), "EditKerning", D::I16, E::Char(C::Kerning));
    r.add(edit(EE_CHAR_WLM), "EditWordLineMode", D::Bool, E::Char(C::WordLineMode));
    r.add(edit(EE_CHAR_LANGUAGE), "EditLanguage", D::U16, E::Char(C::Language(Script::Latin)));
    r.add(edit(EE_CHAR_EMPHASISMARK), "EditEmphasisMark", D::U16, E::Char(C::EmphasisMark));
    r.add(edit(EE_CHAR_RELIEF), "EditRelief", D::U16, E::Char(C::Relief));
    r.add(edit(EE_FEATURE_TAB), "EditTab", D::Void, E::Content);
    r.add(edit(EE_FEATURE_LINEBR), "EditLineBreak", D::Void, E::Content);
    r.add(edit(EE_FEATURE_FIELD), "EditField", D::Field, E::Content);
}

fn register_calc(r: &mut Registry) {
    let calc = AttributeKey::calc;
    r.add(calc(ATTR_FONT), "CellFont", D::Font, E::Char(C::Font(Script::Latin)));
    r.add(
        calc(ATTR_FONT_HEIGHT),
        "CellFontHeight",
        D::Record(&schema::FONT_HEIGHT),
        E::Char(C::FontSize(Script::Latin)),
    );
    r.add(calc(ATTR_FONT_WEIGHT), "CellFontWeight", D::U8, E::Char(C::Weight(Script::Latin)));
    r.add(calc(ATTR_FONT_POSTURE), "CellFontPosture", D::U8, E::Char(C::Posture(Script::Latin)));
    r.add(calc(ATTR_FONT_UNDERLINE), "CellFontUnderline", D::U8, E::Char(C::Underline));
    r.add(calc(ATTR_FONT_CROSSEDOUT), "CellFontCrossedOut", D::U8, E::Char(C::CrossedOut));
    r.add(calc(ATTR_FONT_CONTOUR), "CellFontContour", D::Bool, E::Char(C::Contour));
    r.add(calc(ATTR_FONT_SHADOWED), "CellFontShadowed", D::Bool, E::Char(C::Shadowed));
    r.add(calc(ATTR_FONT_COLOR), "CellFontColor", D::Color, E::Char(C::Color));
    r.add(calc(ATTR_FONT_LANGUAGE), "CellFontLanguage", D::U16, E::Char(C::Language(Script::Latin)));
    r.add(calc(ATTR_HOR_JUSTIFY), "CellHorJustify", D::U16, E::Cell(Cell::HorJustify));
    r.add(calc(ATTR_INDENT), "CellIndent", D::U16, E::Cell(Cell::Indent));
    r.add(calc(ATTR_VER_JUSTIFY), "CellVerJustify", D::U16, E::Cell(Cell::VerJustify));
    r.add(calc(ATTR_ORIENTATION), "CellOrientation", D::U16, E::Cell(Cell::Orientation));
    r.add(calc(ATTR_ROTATE_VALUE), "CellRotateValue", D::I32, E::Cell(Cell::RotateValue));
    r.add(calc(ATTR_ROTATE_MODE), "CellRotateMode", D::U16, E::None);
    r.add(calc(ATTR_LINEBREAK), "CellLineBreak", D::Bool, E::Cell(Cell::LineBreak));
    r.add(calc(ATTR_MARGIN), "CellMargin", D::Record(&schema::MARGIN), E::Cell(Cell::Margin));
    r.add_default(
        calc(ATTR_MERGE),
        "CellMerge",
        D::Vec2i16,
        E::Cell(Cell::Merge),
        AttributeValue::Vec2i(1, 1),
    );
    r.add(calc(ATTR_MERGE_FLAG), "CellMergeFlag", D::U16, E::None);
    r.add(calc(ATTR_VALUE_FORMAT), "CellValueFormat", D::U32, E::Cell(Cell::ValueFormat));
    r.add(calc(ATTR_LANGUAGE_FORMAT), "CellLanguageFormat", D::U16, E::None);
    r.add(calc(ATTR_BACKGROUND), "CellBackground", D::Brush, E::Frame(F::Background));
    r.add(
        calc(ATTR_PROTECTION),
        "CellProtection",
        D::Record(&schema::CELL_PROTECTION),
        E::Cell(Cell::Protection),
    );
    r.add(calc(ATTR_BORDER), "CellBorder", D::Box, E::Frame(F::Box));
    r.add(calc(ATTR_SHADOW), "CellShadow", D::Record(&schema::SHADOW), E::Frame(F::Shadow));
    r.add(calc(ATTR_VALIDDATA), "CellValidData", D::U32, E::None);
    r.add(calc(ATTR_CONDITIONAL), "CellConditional", D::U32, E::None);
    r.add(
        calc(ATTR_PATTERN),
        "CellPattern",
        D::ItemSet {
            family: PoolFamily::Calc,
            first: ATTR_FONT,
            last: ATTR_CONDITIONAL,
        },
        E::NestedSet,
    );

    r.add(calc(ATTR_PAGE_SIZE), "PageSize", D::Vec2i32, E::Cell(Cell::PageSize));
    r.add(calc(ATTR_PAGE_MAXSIZE), "PageMaxSize", D::Vec2i32, E::None);
    let page_set = D::ItemSet {
        family: PoolFamily::Calc,
        first: ATTR_PAGE_SIZE,
        last: ATTR_PAGE_SHARED,
    };
    r.add(calc(ATTR_PAGE_HEADERSET), "PageHeaderSet", page_set, E::None);
    r.add(calc(ATTR_PAGE_FOOTERSET), "PageFooterSet", page_set, E::None);
    r.add(calc(ATTR_PAGE_ON), "PageOn", D::Bool, E::None);
    r.add(calc(ATTR_PAGE_SHARED), "PageShared", D::Bool, E::None);
}

fn register_chart(r: &mut Registry) {
    let chart = AttributeKey::chart;
    r.add(chart(SCHATTR_DATADESCR_DESCR), "ChartDataDescr", D::U16, E::Chart(Ch::DataDescription));
    r.add(chart(SCHATTR_DATADESCR_SHOW_SYM), "ChartShowSymbol", D::Bool, E::Chart(Ch::ShowSymbol));
    r.add(chart(SCHATTR_LEGEND_POS), "ChartLegendPos", D::U16, E::Chart(Ch::LegendPosition));
    r.add(chart(SCHATTR_TEXT_ORIENT), "ChartTextOrient", D::U16, E::Chart(Ch::TextOrientation));
    for (auto, value, auto_name, value_name, property) in [
        (
            SCHATTR_Y_AXIS_AUTO_MIN,
            SCHATTR_Y_AXIS_MIN,
            "ChartAxisAutoMin",
            "ChartAxisMin",
            "chart:minimum",
        ),
        (
            SCHATTR_Y_AXIS_AUTO_MAX,
            SCHATTR_Y_AXIS_MAX,
            "ChartAxisAutoMax",
            "ChartAxisMax",
            "chart:maximum",
        ),
        (
            SCHATTR_Y_AXIS_AUTO_STEP_MAIN,
            SCHATTR_Y_AXIS_STEP_MAIN,
            "ChartAxisAutoStepMain",
            "ChartAxisStepMain",
            "chart:interval-major",
        ),
        (
            SCHATTR_Y_AXIS_AUTO_ORIGIN,
            SCHATTR_Y_AXIS_ORIGIN,
            "ChartAxisAutoOrigin",
            "ChartAxisOrigin",
            "chart:origin",
        ),
    ] {
        r.add_default(
            chart(auto),
            auto_name,
            D::Bool,
            E::Chart(Ch::AxisAuto(property)),
            AttributeValue::Bool(true),
        );
        r.add(chart(value), value_name, D::Double, E::Chart(Ch::AxisValue(property)));
    }
    r.add(chart(SCHATTR_Y_AXIS_LOGARITHM), "ChartAxisLogarithm", D::Bool, E::Chart(Ch::Logarithmic));
    r.add(chart(SCHATTR_STAT_AVERAGE), "ChartStatAverage", D::Bool, E::Chart(Ch::MeanValue));
    r.add(chart(SCHATTR_STAT_KIND_ERROR), "ChartStatKindError", D::U16, E::Chart(Ch::ErrorKind));
    r.add(chart(SCHATTR_STAT_PERCENT), "ChartStatPercent", D::Double, E::Chart(Ch::ErrorPercent));
    for (which, name, property) in [
        (SCHATTR_STYLE_DEEP, "ChartStyleDeep", "chart:deep"),
        (SCHATTR_STYLE_3D, "ChartStyle3D", "chart:three-dimensional"),
        (SCHATTR_STYLE_VERTICAL, "ChartStyleVertical", "chart:vertical"),
        (SCHATTR_STYLE_STACKED, "ChartStyleStacked", "chart:stacked"),
        (SCHATTR_STYLE_PERCENT, "ChartStylePercent", "chart:percentage"),
        (SCHATTR_STYLE_LINES, "ChartStyleLines", "chart:lines"),
    ] {
        r.add(chart(which), name, D::Bool, E::Chart(Ch::StyleFlag(property)));
    }
    r.add(chart(SCHATTR_SYMBOL_SIZE), "ChartSymbolSize", D::Vec2i32, E::Chart(Ch::SymbolSize));
}

fn register_draw(r: &mut Registry) {
    let draw = AttributeKey::draw;
    r.add_default(
        draw(XATTR_LINESTYLE),
        "LineStyle",
        D::U16,
        E::Draw(Dr::LineStyle),
        AttributeValue::UInt(1),
    );
    r.add(draw(XATTR_LINEDASH), "LineDash", D::NamedRecord(&schema::DASH), E::Draw(Dr::LineDash));
    r.add(draw(XATTR_LINEWIDTH), "LineWidth", D::I32, E::Draw(Dr::LineWidth));
    r.add(draw(XATTR_LINECOLOR), "LineColor", D::NamedColor, E::Draw(Dr::LineColor));
    r.add(draw(XATTR_LINESTARTWIDTH), "LineStartWidth", D::I32, E::Draw(Dr::LineStartWidth));
    r.add(draw(XATTR_LINEENDWIDTH), "LineEndWidth", D::I32, E::Draw(Dr::LineEndWidth));
    r.add(draw(XATTR_LINETRANSPARENCE), "LineTransparence", D::U16, E::Draw(Dr::LineTransparence));
    r.add(draw(XATTR_LINEJOINT), "LineJoint", D::U16, E::Draw(Dr::LineJoint));
    r.add_default(
        draw(XATTR_FILLSTYLE),
        "FillStyle",
        D::U16,
        E::Draw(Dr::FillStyle),
        AttributeValue::UInt(1),
    );
    r.add(draw(XATTR_FILLCOLOR), "FillColor", D::NamedColor, E::Draw(Dr::FillColor));
    r.add(
        draw(XATTR_FILLGRADIENT),
        "FillGradient",
        D::NamedRecord(&schema::GRADIENT),
        E::Draw(Dr::FillGradient),
    );
    r.add(draw(XATTR_FILLTRANSPARENCE), "FillTransparence", D::U16, E::Draw(Dr::FillTransparence));
    r.add(draw(SDRATTR_SHADOW), "Shadow", D::Bool, E::Draw(Dr::Shadow));
    r.add(draw(SDRATTR_SHADOWCOLOR), "ShadowColor", D::NamedColor, E::Draw(Dr::ShadowColor));
    r.add(draw(SDRATTR_SHADOWXDIST), "ShadowXDist", D::I32, E::Draw(Dr::ShadowXDist));
    r.add(draw(SDRATTR_SHADOWYDIST), "ShadowYDist", D::I32, E::Draw(Dr::ShadowYDist));
    r.add(
        draw(SDRATTR_SHADOWTRANSPARENCE),
        "ShadowTransparence",
        D::U16,
        E::Draw(Dr::ShadowTransparence),
    );
    r.add(
        draw(SDRATTR_TEXT_MINFRAMEHEIGHT),
        "TextMinFrameHeight",
        D::I32,
        E::Draw(Dr::TextMinFrameHeight),
    );
    r.add_default(
        draw(SDRATTR_TEXT_AUTOGROWHEIGHT),
        "TextAutoGrowHeight",
        D::Bool,
        E::Draw(Dr::TextAutoGrowHeight),
        AttributeValue::Bool(true),
    );
    for (which, name, property) in [
        (SDRATTR_TEXT_LEFTDIST, "TextLeftDist", "fo:padding-left"),
        (SDRATTR_TEXT_RIGHTDIST, "TextRightDist", "fo:padding-right"),
        (SDRATTR_TEXT_UPPERDIST, "TextUpperDist", "fo:padding-top"),
        (SDRATTR_TEXT_LOWERDIST, "TextLowerDist", "fo:padding-bottom"),
    ] {
        r.add(draw(which), name, D::I32, E::Draw(Dr::TextDistance(property)));
    }
    r.add(draw(SDRATTR_TEXT_VERTADJUST), "TextVertAdjust", D::U16, E::Draw(Dr::TextVertAdjust));
    r.add(draw(SDRATTR_TEXT_HORZADJUST), "TextHorzAdjust", D::U16, E::Draw(Dr::TextHorzAdjust));
}

const LIGHT_COLOR_NAMES: [&str; 8] = [
    "SceneLightColor1",
    "SceneLightColor2",
    "SceneLightColor3",
    "SceneLightColor4",
    "SceneLightColor5",
    "SceneLightColor6",
    "SceneLightColor7",
    "SceneLightColor8",
];

const LIGHT_ON_NAMES: [&str; 8] = [
    "SceneLightOn1",
    "SceneLightOn2",
    "SceneLightOn3",
    "SceneLightOn4",
    "SceneLightOn5",
    "SceneLightOn6",
    "SceneLightOn7",
    "SceneLightOn8",
];

fn register_scene3d(r: &mut Registry) {
    let draw = AttributeKey::draw;
    r.add(
        draw(SDRATTR_3DOBJ_PERCENT_DIAGONAL),
        "ObjPercentDiagonal",
        D::U16,
        E::Scene3d(S3::PercentDiagonal),
    );
    r.add_default(
        draw(SDRATTR_3DOBJ_BACKSCALE),
        "ObjBackScale",
        D::U16,
        E::Scene3d(S3::BackScale),
        AttributeValue::UInt(100),
    );
    r.add(draw(SDRATTR_3DOBJ_DEPTH), "ObjDepth", D::U32, E::Scene3d(S3::Depth));
    r.add(draw(SDRATTR_3DOBJ_HORZ_SEGS), "ObjHorzSegs", D::U32, E::Scene3d(S3::HorizontalSegments));
    r.add(draw(SDRATTR_3DOBJ_VERT_SEGS), "ObjVertSegs", D::U32, E::Scene3d(S3::VerticalSegments));
    r.add(draw(SDRATTR_3DOBJ_END_ANGLE), "ObjEndAngle", D::U32, E::Scene3d(S3::EndAngle));
    r.add(draw(SDRATTR_3DOBJ_DOUBLE_SIDED), "ObjDoubleSided", D::Bool, E::Scene3d(S3::DoubleSided));
    r.add(draw(SDRATTR_3DOBJ_NORMALS_KIND), "ObjNormalsKind", D::U16, E::Scene3d(S3::NormalsKind));

    r.add(draw(SDRATTR_3DSCENE_PERSPECTIVE), "ScenePerspective", D::U16, E::Scene3d(S3::Perspective));
    r.add(draw(SDRATTR_3DSCENE_DISTANCE), "SceneDistance", D::U32, E::Scene3d(S3::Distance));
    r.add(draw(SDRATTR_3DSCENE_FOCAL_LENGTH), "SceneFocalLength", D::U32, E::Scene3d(S3::FocalLength));
    r.add(
        draw(SDRATTR_3DSCENE_TWO_SIDED_LIGHTING),
        "SceneTwoSidedLighting",
        D::Bool,
        E::Scene3d(S3::TwoSidedLighting),
    );
    for light in 0..8u8 {
        let slot = usize::from(light);
        r.add(
            draw(SDRATTR_3DSCENE_LIGHTCOLOR_1 + u16::from(light)),
            LIGHT_COLOR_NAMES[slot],
            D::Color,
            E::Scene3d(S3::LightColor(light + 1)),
        );
        r.add(
            draw(SDRATTR_3DSCENE_LIGHTON_1 + u16::from(light)),
            LIGHT_ON_NAMES[slot],
            D::Bool,
            E::Scene3d(S3::LightOn(light + 1)),
        );
    }
    r.add(draw(SDRATTR_3DSCENE_AMBIENTCOLOR), "SceneAmbientColor", D::Color, E::Scene3d(S3::AmbientColor));
    r.add(draw(SDRATTR_3DSCENE_SHADOW_SLANT), "SceneShadowSlant", D::U16, E::Scene3d(S3::ShadowSlant));
    r.add(draw(SDRATTR_3DSCENE_SHADE_MODE), "SceneShadeMode", D::U16, E::Scene3d(S3::ShadeMode));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_unique_per_family() {
        for family in [
            PoolFamily::Writer,
            PoolFamily::EditEngine,
            PoolFamily::Calc,
            PoolFamily::Chart,
            PoolFamily::Draw,
        ] {
            let mut names: Vec<_> = registry().family(family).iter().map(|spec| spec.name).collect();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total, "duplicate name in {}", family);
        }
    }

    #[test]
    fn test_create_clones_prototype() {
        let attr = registry().create(writer(RES_PARATR_SPLIT)).unwrap();
        assert_eq!(attr.name, "ParaSplit");
        assert_eq!(attr.value, AttributeValue::Bool(true));
        assert!(registry().create(writer(9999)).is_none());
    }

    #[test]
    fn test_light_ranges_do_not_overlap() {
        let last_color = SDRATTR_3DSCENE_LIGHTCOLOR_1 + 7;
        assert!(last_color < SDRATTR_3DSCENE_AMBIENTCOLOR);
        assert!(SDRATTR_3DSCENE_AMBIENTCOLOR < SDRATTR_3DSCENE_LIGHTON_1);
        assert_eq!(
            registry()
                .spec(AttributeKey::draw(SDRATTR_3DSCENE_LIGHTON_1 + 7))
                .map(|spec| spec.name),
            Some("SceneLightOn8")
        );
    }
}
