pub mod balancer;
pub mod extraction;
pub mod matrix;

pub use balancer::balance;
pub use extraction::{
    extract_flat, extract_slices, ExtractionError, FlatDataset, LabeledTable, RawRestrictions,
    SliceRanges,
};
pub use matrix::{BalanceError, Restrictions, TripMatrix};
