//! The trait implemented by every node in the tree.

use std::ops::Range;

use crate::attr::Attr;

/// The operations available on any AST node.
pub trait Node {
    /// Gets the positional attributes of the node.
    fn attr(&self) -> &Attr;

    /// Gets the node's `type` discriminator as it appears in the parser's
    /// output, such as `"CallExpression"`.
    fn kind(&self) -> &'static str;

    /// Gets the range of source offsets covered by the node.
    fn span(&self) -> Range<usize> {
        self.attr().span()
    }
}

/// Implements [`Node`] for structs that hold their attributes in an `attr`
/// field.
///
/// ```ignore
/// impl_node!(Identifier => "Identifier");
/// ```
macro_rules! impl_node {
    ($($ty:ty => $kind:literal),+ $(,)?) => {
        $(
            impl $crate::node::Node for $ty {
                fn attr(&self) -> &$crate::attr::Attr {
                    &self.attr
                }

                fn kind(&self) -> &'static str {
                    $kind
                }
            }
        )+
    };
}

pub(crate) use impl_node;
