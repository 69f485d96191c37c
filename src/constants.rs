// Element type stored in a bag.
pub type Value = i32;

// Maximum number of elements a bag can hold.
pub const CAPACITY: usize = 20;

// Values the self-check fixtures are filled from.
pub const REFERENCE_VALUES: [Value; CAPACITY] = [
    1, 2, 3, 4, 5, 6, 7, 8, 8, 8, 9, 10, 11, 12, 13, 14, 14, 15, 19, 20,
];

// How many reference values go into the partially full fixture.
pub const PARTIAL_FILL: usize = 6;

// Defaults for the randomized rounds.
pub const DEFAULT_ROUNDS: usize = 200;
pub const DEFAULT_SEED: u64 = 0x5eed;
pub const RANDOM_VALUE_RANGE: Value = 8; // Small range so duplicates are common.
