// User circuit configuration
pub const USER_ADVICE_COLS: usize = 4;
pub const USER_LOOKUP_ADVICE_COLS: usize = 1;
pub const USER_FIXED_COLS: usize = 1;
pub const USER_INSTANCE_COLS: usize = 1;

/// Default maximum number of logical outputs of a user circuit.
pub const USER_MAX_OUTPUTS: usize = 128;
/// Default maximum number of data subqueries a user circuit may request.
pub const USER_MAX_SUBQUERIES: usize = 128;
/// Each user output is a bytes32 split into hi-lo field elements.
pub const USER_RESULT_FIELD_ELEMENTS: usize = 2;
pub const USER_RESULT_BYTES: usize = 32;

/// Maximum number of field elements used to describe a single subquery, excluding its type.
pub const MAX_SUBQUERY_INPUTS: usize = 13;
/// The value of a subquery is always a bytes32, i.e. hi-lo.
pub const MAX_SUBQUERY_OUTPUTS: usize = 2;
/// Field elements per subquery result in the public instances: `[type, ..inputs, hi, lo]`.
pub const SUBQUERY_RESULT_LEN: usize = 1 + MAX_SUBQUERY_INPUTS + MAX_SUBQUERY_OUTPUTS;

pub const MAX_SOLIDITY_MAPPING_KEYS: usize = 4;

pub const USER_PROOF_LEN_BYTES: usize = 4;

/// Circuit metadata always packs into a single bytes32.
pub const CIRCUIT_METADATA_BYTES: usize = 32;
/// Only metadata versions listed here can be decoded.
pub const SUPPORTED_CIRCUIT_METADATA_VERSIONS: [u8; 1] = [0];
/// halo2 supports at most 3 phases.
pub const MAX_PHASES: usize = 3;
