/// Maximum integers per `generate_random_integer` call.
pub const MAX_INTEGER_COUNT: i64 = 1000;

/// Maximum floats per `generate_random_float` call.
pub const MAX_FLOAT_COUNT: i64 = 1000;

/// Maximum decimal places a float may be rounded to.
pub const MAX_FLOAT_PRECISION: i64 = 15;

/// Maximum byte length for `generate_random_bytes`.
pub const MAX_BYTES_LENGTH: i64 = 1024;

/// Maximum UUIDs per `generate_uuid` call.
pub const MAX_UUID_COUNT: i64 = 100;

/// Maximum string length for `generate_random_string`.
pub const MAX_STRING_LENGTH: i64 = 256;

/// Maximum strings per `generate_random_string` call.
pub const MAX_STRING_COUNT: i64 = 100;

/// Maximum selections per `generate_random_choice` call.
pub const MAX_CHOICE_COUNT: i64 = 1000;

/// Maximum booleans per `generate_random_boolean` call.
pub const MAX_BOOLEAN_COUNT: i64 = 1000;

/// Tool names, in listing order.
pub const TOOL_RANDOM_INTEGER: &str = "generate_random_integer";
pub const TOOL_RANDOM_FLOAT: &str = "generate_random_float";
pub const TOOL_RANDOM_BYTES: &str = "generate_random_bytes";
pub const TOOL_UUID: &str = "generate_uuid";
pub const TOOL_RANDOM_STRING: &str = "generate_random_string";
pub const TOOL_RANDOM_CHOICE: &str = "generate_random_choice";
pub const TOOL_RANDOM_BOOLEAN: &str = "generate_random_boolean";

/// Name of the guidance prompt.
pub const PROMPT_GENERATE_RANDOM: &str = "generate_random";
