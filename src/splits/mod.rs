mod partitioner;

pub use partitioner::{
    Partition, PartitionError, SplitKind, SplitStrategy, split, split_random, split_sequential,
    train_size,
};
