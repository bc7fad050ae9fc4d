use crate::region::Region;

/// Describes the internal state of a `Parser`.
pub enum BlockState {
    /// The `Parser` is evaluating a "block" tag.
    Block {
        /// The name of the block.
        name: String,
        /// Region spanning the opening "block" tag.
        region: Region,
    },
}
