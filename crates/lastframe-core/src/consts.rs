/// Directory, next to the executable, holding the default input and output.
pub const DEFAULT_ASSET_DIR: &str = "public";

/// Default animated input file name inside [`DEFAULT_ASSET_DIR`].
pub const DEFAULT_INPUT_NAME: &str = "landing_cat.gif";

/// Default still output file name inside [`DEFAULT_ASSET_DIR`].
pub const DEFAULT_OUTPUT_NAME: &str = "landing_cat_static.png";
