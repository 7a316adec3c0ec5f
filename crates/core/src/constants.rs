/// Constants used throughout the vaultenv codebase
// Marker for secret references embedded in a full environment file
pub const SECRET_REFERENCE_PREFIX: &str = "keyvault://";

// Separator between a secret name and a pinned version
pub const SECRET_VERSION_SEPARATOR: char = '/';

// Default output file
pub const DEFAULT_OUTPUT_FILE: &str = ".env";

// Environment variable names
pub const VAULTENV_LOG_VAR: &str = "VAULTENV_LOG";
pub const VAULTENV_SECRETS_FILE_VAR: &str = "VAULTENV_SECRETS_FILE";
pub const VAULTENV_OUTPUT_FILE_VAR: &str = "VAULTENV_OUTPUT_FILE";
pub const VAULTENV_VAULT_VAR: &str = "VAULTENV_VAULT";
pub const VAULTENV_BACKEND_VAR: &str = "VAULTENV_BACKEND";

// Key Vault service
pub const KEYVAULT_DNS_SUFFIX: &str = "vault.azure.net";

// Default command for the subprocess backend
pub const DEFAULT_CLI_COMMAND: &str = "az";

// Service principal settings picked up from the environment
pub const AZURE_TENANT_ID_VAR: &str = "AZURE_TENANT_ID";
pub const AZURE_CLIENT_ID_VAR: &str = "AZURE_CLIENT_ID";
pub const AZURE_CLIENT_SECRET_VAR: &str = "AZURE_CLIENT_SECRET";
