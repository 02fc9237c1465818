pub mod descriptor;

pub use descriptor::{
    addressable_bits, capacity, serialized_size, total_addressable_states, Descriptor,
    DEFAULT_N_MAX, MAX_LEVELS,
};
