human_errors::error_shim!(Error);
