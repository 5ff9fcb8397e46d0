mod env_settings;
