//! Which-id constants per pool family.
//!
//! Ids are stable across format versions; the binary layout behind an id
//! may still change with the item version written next to it.

// Writer pool: character attributes

pub const RES_CHRATR_CASEMAP: u16 = 1;
pub const RES_CHRATR_CHARSETCOLOR: u16 = 2;
pub const RES_CHRATR_COLOR: u16 = 3;
pub const RES_CHRATR_CONTOUR: u16 = 4;
pub const RES_CHRATR_CROSSEDOUT: u16 = 5;
pub const RES_CHRATR_ESCAPEMENT: u16 = 6;
pub const RES_CHRATR_FONT: u16 = 7;
pub const RES_CHRATR_FONTSIZE: u16 = 8;
pub const RES_CHRATR_KERNING: u16 = 9;
pub const RES_CHRATR_LANGUAGE: u16 = 10;
pub const RES_CHRATR_POSTURE: u16 = 11;
pub const RES_CHRATR_PROPORTIONALFONTSIZE: u16 = 12;
pub const RES_CHRATR_SHADOWED: u16 = 13;
pub const RES_CHRATR_UNDERLINE: u16 = 14;
pub const RES_CHRATR_WEIGHT: u16 = 15;
pub const RES_CHRATR_WORDLINEMODE: u16 = 16;
pub const RES_CHRATR_AUTOKERN: u16 = 17;
pub const RES_CHRATR_BLINK: u16 = 18;
pub const RES_CHRATR_NOHYPHEN: u16 = 19;
pub const RES_CHRATR_NOLINEBREAK: u16 = 20;
pub const RES_CHRATR_BACKGROUND: u16 = 21;
pub const RES_CHRATR_CJK_FONT: u16 = 22;
pub const RES_CHRATR_CJK_FONTSIZE: u16 = 23;
pub const RES_CHRATR_CJK_LANGUAGE: u16 = 24;
pub const RES_CHRATR_CJK_POSTURE: u16 = 25;
pub const RES_CHRATR_CJK_WEIGHT: u16 = 26;
pub const RES_CHRATR_CTL_FONT: u16 = 27;
pub const RES_CHRATR_CTL_FONTSIZE: u16 = 28;
pub const RES_CHRATR_CTL_LANGUAGE: u16 = 29;
pub const RES_CHRATR_CTL_POSTURE: u16 = 30;
pub const RES_CHRATR_CTL_WEIGHT: u16 = 31;
pub const RES_CHRATR_ROTATE: u16 = 32;
pub const RES_CHRATR_EMPHASIS_MARK: u16 = 33;
pub const RES_CHRATR_TWO_LINES: u16 = 34;
pub const RES_CHRATR_SCALEW: u16 = 35;
pub const RES_CHRATR_RELIEF: u16 = 36;
pub const RES_CHRATR_HIDDEN: u16 = 37;
pub const RES_CHRATR_END: u16 = 38;

// Writer pool: text attributes (hints with content)

pub const RES_TXTATR_INETFMT: u16 = 38;
pub const RES_TXTATR_REFMARK: u16 = 40;
pub const RES_TXTATR_TOXMARK: u16 = 41;
pub const RES_TXTATR_CHARFMT: u16 = 42;
pub const RES_TXTATR_CJK_RUBY: u16 = 44;
pub const RES_TXTATR_UNKNOWN_CONTAINER: u16 = 45;
pub const RES_TXTATR_FIELD: u16 = 46;
pub const RES_TXTATR_FLYCNT: u16 = 47;
pub const RES_TXTATR_FTN: u16 = 48;
pub const RES_TXTATR_SOFTHYPH: u16 = 49;
pub const RES_TXTATR_HARDBLANK: u16 = 50;
pub const RES_TXTATR_END: u16 = 52;

// Writer pool: paragraph attributes

pub const RES_PARATR_LINESPACING: u16 = 52;
pub const RES_PARATR_ADJUST: u16 = 53;
pub const RES_PARATR_SPLIT: u16 = 54;
pub const RES_PARATR_ORPHANS: u16 = 55;
pub const RES_PARATR_WIDOWS: u16 = 56;
pub const RES_PARATR_TABSTOP: u16 = 57;
pub const RES_PARATR_HYPHENZONE: u16 = 58;
pub const RES_PARATR_DROP: u16 = 59;
pub const RES_PARATR_REGISTER: u16 = 60;
pub const RES_PARATR_NUMRULE: u16 = 61;
pub const RES_PARATR_SCRIPTSPACE: u16 = 62;
pub const RES_PARATR_HANGINGPUNCTUATION: u16 = 63;
pub const RES_PARATR_FORBIDDEN_RULES: u16 = 64;
pub const RES_PARATR_VERTALIGN: u16 = 65;
pub const RES_PARATR_SNAPTOGRID: u16 = 66;
pub const RES_PARATR_CONNECT_BORDER: u16 = 67;
pub const RES_PARATR_END: u16 = 70;

// Writer pool: frame attributes

pub const RES_FILL_ORDER: u16 = 70;
pub const RES_FRM_SIZE: u16 = 71;
pub const RES_PAPER_BIN: u16 = 72;
pub const RES_LR_SPACE: u16 = 73;
pub const RES_UL_SPACE: u16 = 74;
pub const RES_PAGEDESC: u16 = 75;
pub const RES_BREAK: u16 = 76;
pub const RES_CNTNT: u16 = 77;
pub const RES_HEADER: u16 = 78;
pub const RES_FOOTER: u16 = 79;
pub const RES_PRINT: u16 = 80;
pub const RES_OPAQUE: u16 = 81;
pub const RES_PROTECT: u16 = 82;
pub const RES_SURROUND: u16 = 83;
pub const RES_VERT_ORIENT: u16 = 84;
pub const RES_HORI_ORIENT: u16 = 85;
pub const RES_ANCHOR: u16 = 86;
pub const RES_BACKGROUND: u16 = 87;
pub const RES_BOX: u16 = 88;
pub const RES_SHADOW: u16 = 89;
pub const RES_FRMMACRO: u16 = 90;
pub const RES_COL: u16 = 91;
pub const RES_KEEP: u16 = 92;
pub const RES_URL: u16 = 93;
pub const RES_EDIT_IN_READONLY: u16 = 94;
pub const RES_LAYOUT_SPLIT: u16 = 95;
pub const RES_FRMATR_END: u16 = 100;

// Writer pool: graphic attributes

pub const RES_GRFATR_MIRRORGRF: u16 = 100;
pub const RES_GRFATR_CROPGRF: u16 = 101;
pub const RES_GRFATR_ROTATION: u16 = 102;
pub const RES_GRFATR_LUMINANCE: u16 = 103;
pub const RES_GRFATR_CONTRAST: u16 = 104;
pub const RES_GRFATR_CHANNELR: u16 = 105;
pub const RES_GRFATR_CHANNELG: u16 = 106;
pub const RES_GRFATR_CHANNELB: u16 = 107;
pub const RES_GRFATR_GAMMA: u16 = 108;
pub const RES_GRFATR_INVERT: u16 = 109;
pub const RES_GRFATR_TRANSPARENCY: u16 = 110;
pub const RES_GRFATR_DRAWMODE: u16 = 111;
pub const RES_GRFATR_END: u16 = 115;

// Writer pool: table box attributes

pub const RES_BOXATR_FORMAT: u16 = 115;
pub const RES_BOXATR_FORMULA: u16 = 116;
pub const RES_BOXATR_VALUE: u16 = 117;
pub const RES_BOXATR_END: u16 = 118;

// Edit engine pool

pub const EE_PARA_WRITINGDIR: u16 = 3999;
pub const EE_PARA_BULLETSTATE: u16 = 4000;
pub const EE_PARA_OUTLLEVEL: u16 = 4001;
pub const EE_PARA_BULLET: u16 = 4002;
pub const EE_PARA_LRSPACE: u16 = 4003;
pub const EE_PARA_ULSPACE: u16 = 4004;
pub const EE_PARA_SBL: u16 = 4005;
pub const EE_PARA_JUST: u16 = 4006;
pub const EE_PARA_TABS: u16 = 4007;
pub const EE_CHAR_COLOR: u16 = 4008;
pub const EE_CHAR_FONTINFO: u16 = 4009;
pub const EE_CHAR_FONTHEIGHT: u16 = 4010;
pub const EE_CHAR_FONTWIDTH: u16 = 4011;
pub const EE_CHAR_WEIGHT: u16 = 4012;
pub const EE_CHAR_UNDERLINE: u16 = 4013;
pub const EE_CHAR_STRIKEOUT: u16 = 4014;
pub const EE_CHAR_ITALIC: u16 = 4015;
pub const EE_CHAR_OUTLINE: u16 = 4016;
pub const EE_CHAR_SHADOW: u16 = 4017;
pub const EE_CHAR_ESCAPEMENT: u16 = 4018;
pub const EE_CHAR_PAIRKERNING: u16 = 4019;
pub const EE_CHAR_KERNING: u16 = 4020;
pub const EE_CHAR_WLM: u16 = 4021;
pub const EE_CHAR_LANGUAGE: u16 = 4022;
pub const EE_CHAR_EMPHASISMARK: u16 = 4023;
pub const EE_CHAR_RELIEF: u16 = 4024;
pub const EE_FEATURE_TAB: u16 = 4025;
pub const EE_FEATURE_LINEBR: u16 = 4026;
pub const EE_FEATURE_FIELD: u16 = 4027;

// Calc pool

pub const ATTR_FONT: u16 = 100;
pub const ATTR_FONT_HEIGHT: u16 = 101;
pub const ATTR_FONT_WEIGHT: u16 = 102;
pub const ATTR_FONT_POSTURE: u16 = 103;
pub const ATTR_FONT_UNDERLINE: u16 = 104;
pub const ATTR_FONT_CROSSEDOUT: u16 = 105;
pub const ATTR_FONT_CONTOUR: u16 = 106;
pub const ATTR_FONT_SHADOWED: u16 = 107;
pub const ATTR_FONT_COLOR: u16 = 108;
pub const ATTR_FONT_LANGUAGE: u16 = 109;
pub const ATTR_HOR_JUSTIFY: u16 = 110;
pub const ATTR_INDENT: u16 = 111;
pub const ATTR_VER_JUSTIFY: u16 = 112;
pub const ATTR_ORIENTATION: u16 = 113;
pub const ATTR_ROTATE_VALUE: u16 = 114;
pub const ATTR_ROTATE_MODE: u16 = 115;
pub const ATTR_LINEBREAK: u16 = 116;
pub const ATTR_MARGIN: u16 = 117;
pub const ATTR_MERGE: u16 = 118;
pub const ATTR_MERGE_FLAG: u16 = 119;
pub const ATTR_VALUE_FORMAT: u16 = 120;
pub const ATTR_LANGUAGE_FORMAT: u16 = 121;
pub const ATTR_BACKGROUND: u16 = 122;
pub const ATTR_PROTECTION: u16 = 123;
pub const ATTR_BORDER: u16 = 124;
pub const ATTR_SHADOW: u16 = 126;
pub const ATTR_VALIDDATA: u16 = 127;
pub const ATTR_CONDITIONAL: u16 = 128;
/// Nested set of cell attributes (`ATTR_FONT..=ATTR_CONDITIONAL`)
pub const ATTR_PATTERN: u16 = 130;
pub const ATTR_PAGE_SIZE: u16 = 140;
pub const ATTR_PAGE_MAXSIZE: u16 = 141;
/// Nested set of page header attributes
pub const ATTR_PAGE_HEADERSET: u16 = 142;
/// Nested set of page footer attributes
pub const ATTR_PAGE_FOOTERSET: u16 = 143;
pub const ATTR_PAGE_ON: u16 = 144;
pub const ATTR_PAGE_SHARED: u16 = 145;

// Chart pool

pub const SCHATTR_DATADESCR_DESCR: u16 = 1;
pub const SCHATTR_DATADESCR_SHOW_SYM: u16 = 2;
pub const SCHATTR_LEGEND_POS: u16 = 3;
pub const SCHATTR_TEXT_ORIENT: u16 = 4;
pub const SCHATTR_Y_AXIS_AUTO_MIN: u16 = 10;
pub const SCHATTR_Y_AXIS_MIN: u16 = 11;
pub const SCHATTR_Y_AXIS_AUTO_MAX: u16 = 12;
pub const SCHATTR_Y_AXIS_MAX: u16 = 13;
pub const SCHATTR_Y_AXIS_AUTO_STEP_MAIN: u16 = 14;
pub const SCHATTR_Y_AXIS_STEP_MAIN: u16 = 15;
pub const SCHATTR_Y_AXIS_LOGARITHM: u16 = 16;
pub const SCHATTR_Y_AXIS_AUTO_ORIGIN: u16 = 17;
pub const SCHATTR_Y_AXIS_ORIGIN: u16 = 18;
pub const SCHATTR_STAT_AVERAGE: u16 = 30;
pub const SCHATTR_STAT_KIND_ERROR: u16 = 31;
pub const SCHATTR_STAT_PERCENT: u16 = 32;
pub const SCHATTR_STYLE_DEEP: u16 = 40;
pub const SCHATTR_STYLE_3D: u16 = 41;
pub const SCHATTR_STYLE_VERTICAL: u16 = 42;
pub const SCHATTR_STYLE_STACKED: u16 = 43;
pub const SCHATTR_STYLE_PERCENT: u16 = 44;
pub const SCHATTR_STYLE_LINES: u16 = 45;
pub const SCHATTR_SYMBOL_SIZE: u16 = 50;

// Drawing pool: line, fill and shadow

pub const XATTR_LINESTYLE: u16 = 1000;
pub const XATTR_LINEDASH: u16 = 1001;
pub const XATTR_LINEWIDTH: u16 = 1002;
pub const XATTR_LINECOLOR: u16 = 1003;
pub const XATTR_LINESTARTWIDTH: u16 = 1006;
pub const XATTR_LINEENDWIDTH: u16 = 1007;
pub const XATTR_LINETRANSPARENCE: u16 = 1010;
pub const XATTR_LINEJOINT: u16 = 1011;
pub const XATTR_FILLSTYLE: u16 = 1018;
pub const XATTR_FILLCOLOR: u16 = 1019;
pub const XATTR_FILLGRADIENT: u16 = 1020;
pub const XATTR_FILLTRANSPARENCE: u16 = 1023;
pub const SDRATTR_SHADOW: u16 = 1067;
pub const SDRATTR_SHADOWCOLOR: u16 = 1068;
pub const SDRATTR_SHADOWXDIST: u16 = 1069;
pub const SDRATTR_SHADOWYDIST: u16 = 1070;
pub const SDRATTR_SHADOWTRANSPARENCE: u16 = 1071;

// Drawing pool: text frame

pub const SDRATTR_TEXT_MINFRAMEHEIGHT: u16 = 1090;
pub const SDRATTR_TEXT_AUTOGROWHEIGHT: u16 = 1091;
pub const SDRATTR_TEXT_LEFTDIST: u16 = 1093;
pub const SDRATTR_TEXT_RIGHTDIST: u16 = 1094;
pub const SDRATTR_TEXT_UPPERDIST: u16 = 1095;
pub const SDRATTR_TEXT_LOWERDIST: u16 = 1096;
pub const SDRATTR_TEXT_VERTADJUST: u16 = 1097;
pub const SDRATTR_TEXT_HORZADJUST: u16 = 1100;

// Drawing pool: 3D objects and scenes

pub const SDRATTR_3DOBJ_PERCENT_DIAGONAL: u16 = 1229;
pub const SDRATTR_3DOBJ_BACKSCALE: u16 = 1230;
pub const SDRATTR_3DOBJ_DEPTH: u16 = 1231;
pub const SDRATTR_3DOBJ_HORZ_SEGS: u16 = 1232;
pub const SDRATTR_3DOBJ_VERT_SEGS: u16 = 1233;
pub const SDRATTR_3DOBJ_END_ANGLE: u16 = 1234;
pub const SDRATTR_3DOBJ_DOUBLE_SIDED: u16 = 1235;
pub const SDRATTR_3DOBJ_NORMALS_KIND: u16 = 1236;
pub const SDRATTR_3DSCENE_PERSPECTIVE: u16 = 1250;
pub const SDRATTR_3DSCENE_DISTANCE: u16 = 1251;
pub const SDRATTR_3DSCENE_FOCAL_LENGTH: u16 = 1252;
pub const SDRATTR_3DSCENE_TWO_SIDED_LIGHTING: u16 = 1253;
/// First of eight light colours
pub const SDRATTR_3DSCENE_LIGHTCOLOR_1: u16 = 1254;
pub const SDRATTR_3DSCENE_AMBIENTCOLOR: u16 = 1262;
/// First of eight light switches
pub const SDRATTR_3DSCENE_LIGHTON_1: u16 = 1263;
pub const SDRATTR_3DSCENE_SHADOW_SLANT: u16 = 1279;
pub const SDRATTR_3DSCENE_SHADE_MODE: u16 = 1280;
