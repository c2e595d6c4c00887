//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Iris Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[model]
# name = "gemini-2.5-flash"
# base_url = "https://generativelanguage.googleapis.com/v1beta/models"
# max_output_tokens = 8192   # 1-65536, unset = model default
# temperature = 1.0          # 0.0-2.0, unset = model default

[api]
# The first non-empty variable wins. Values may also come from a .env file
# in the working directory or next to this file.
# key_env = ["GEMINI_API_KEY", "API_KEY"]

[attachments]
# max_image_bytes = 20971520  # 1 B - 20 MiB

[logging]
# level = "INFO"             # DEBUG, INFO, WARNING, ERROR
"##
}
