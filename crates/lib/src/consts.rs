/// Optional per-project settings file, looked up in the project root.
pub const CONFIG_FILENAME: &str = "cbuild.toml";

pub const DEFAULT_BUILD_DIR: &str = "build";
pub const DEFAULT_GENERATOR: &str = "cmake";
pub const DEFAULT_TEST_OPTION: &str = "-DTESTING=ON";
pub const DEFAULT_APP: &str = "./mylib_app";
pub const DEFAULT_TEST_BINARY: &str = "./mylib_test";
pub const DEFAULT_CHECKER: &str = "valgrind";
