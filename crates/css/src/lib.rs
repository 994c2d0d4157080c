pub mod inline;
pub mod matching;
pub mod syntax;

// Re-exports so other crates can just use `css::...` nicely.
pub use inline::{get_inline_style, set_style_property, style_property};
pub use matching::query_all;
pub use syntax::{
    AttributeOp, Combinator, ComplexSelector, Compound, Declaration, Selector, SelectorError,
    SelectorList, parse_declarations, parse_selector_list, serialize_declarations,
};
