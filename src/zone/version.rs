//! Compatibility versions used to gate optional fields.
//!
//! Writer streams carry one version word in their header; the thresholds
//! below are the revisions at which a layout gained or changed a field.

/// String pool carries a charset and predefined-style ids.
pub const SWG_POOLIDS: u16 = 0x0006;
/// 16-bit tab and numbering levels.
pub const SWG_LONGIDX: u16 = 0x0201;
/// 32-bit record sizes beyond 24 bits.
pub const SWG_LONGRECS: u16 = 0x0209;
/// Desktop 4.0 (StarOffice 4) layout changes.
pub const SWG_DESKTOP40: u16 = 0x0210;
/// StarOffice 5 additions.
pub const SWG_VERSION_50: u16 = 0x0220;

/// Calc stream revisions.
pub const SC_FONTCHARSET: u16 = 0x0101;
pub const SC_31_EXPORT: u16 = 0x0103;
pub const SC_VERSION_50: u16 = 0x0201;

/// Drawing-layer header version from which objects carry layer ids.
pub const SDR_LAYER_IDS: u16 = 3;
