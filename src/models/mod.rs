//! Serde data model for decks: themes, layout templates, items, and slides.

pub mod common;
pub mod item;
pub mod layout;
pub mod slide;
pub mod theme;

pub use common::{Align, GridRect, TextContent, TextFormatting, TextSegment, VAlign};
pub use item::{
    ButtonData, ButtonVariant, ChartData, ChartKind, ChartPoint, CodeData, DeckItem, HeaderData,
    ItemKind, KpiCardData, ListData, ListStyle, MetricCardData, NoteData, NoteSeverity,
    PhotoCardData, QuoteData, QuoteVariant, RichTextData, RichTextRole, RichTextVariant, TableData,
    TestimonialData, TextData, TimelineData, TimelineEvent,
};
pub use layout::{GridParams, LayoutTemplate};
pub use slide::{ItemOverride, SlideConfig, TitleSlideInfo};
pub use theme::{FontFamily, Gradients, Theme, ThemeColors, Typography};
