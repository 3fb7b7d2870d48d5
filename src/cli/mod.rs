use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};

use crate::connector::adapter::{
    DEFAULT_COMPLETION_URL, DEFAULT_COUNTER_KEY, DEFAULT_MARKETPLACE_URL, DEFAULT_MODEL,
};
use crate::connector::api::ContainerConfig;
use crate::domain::{NameLength, Preferences};

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        #[arg(long, env = "PORT", default_value = "3000")]
        port: u16,
    },

    /// Fetch a marketplace product and print the normalized record
    Fetch {
        /// Product id or product page URL
        product: String,
    },

    /// Fetch a marketplace product and suggest new names for it
    Generate {
        /// Product id or product page URL
        product: String,

        #[arg(long)]
        no_brand: bool,

        #[arg(long)]
        no_category: bool,

        #[arg(long)]
        no_features: bool,

        #[arg(short, long, value_enum, default_value = "medium")]
        length: LengthArg,
    },

    /// Print the number of successful generations
    Stats,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LengthArg {
    Short,
    Medium,
    Long,
}

impl From<LengthArg> for NameLength {
    fn from(arg: LengthArg) -> Self {
        match arg {
            LengthArg::Short => NameLength::Short,
            LengthArg::Medium => NameLength::Medium,
            LengthArg::Long => NameLength::Long,
        }
    }
}

pub fn preferences_from_flags(
    no_brand: bool,
    no_category: bool,
    no_features: bool,
    length: LengthArg,
) -> Preferences {
    Preferences::default()
        .with_brand(!no_brand)
        .with_category(!no_category)
        .with_features(!no_features)
        .with_name_length(length.into())
}

/// Upstream endpoints and credentials, shared by every command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(long, global = true, env = "BASALAM_BASE_URL", default_value = DEFAULT_MARKETPLACE_URL)]
    pub marketplace_base_url: String,

    #[arg(long, global = true, env = "OPENAI_BASE_URL", default_value = DEFAULT_COMPLETION_URL)]
    pub openai_base_url: String,

    #[arg(long, global = true, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub openai_api_key: String,

    #[arg(long, global = true, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub openai_model: String,

    /// Key for the Helicone logging proxy
    #[arg(long, global = true, env = "HELICONE_API_KEY", hide_env_values = true)]
    pub helicone_api_key: Option<String>,

    /// Do not request `json_object` replies from the completion API
    #[arg(long, global = true, env = "OPENAI_NO_JSON_MODE")]
    pub no_json_mode: bool,

    /// Upstash Redis REST URL; without it an in-process counter is used
    #[arg(long, global = true, env = "UPSTASH_REDIS_REST_URL")]
    pub counter_url: Option<String>,

    #[arg(long, global = true, env = "UPSTASH_REDIS_REST_TOKEN", default_value = "", hide_env_values = true)]
    pub counter_token: String,

    #[arg(long, global = true, env = "COUNTER_KEY", default_value = DEFAULT_COUNTER_KEY)]
    pub counter_key: String,

    #[arg(long, global = true, env = "HTTP_TIMEOUT_SECS", default_value = "60")]
    pub timeout_secs: u64,
}

impl ConfigArgs {
    pub fn into_container_config(self) -> ContainerConfig {
        ContainerConfig {
            marketplace_base_url: self.marketplace_base_url,
            completion_base_url: self.openai_base_url,
            completion_api_key: self.openai_api_key,
            completion_model: self.openai_model,
            proxy_api_key: self.helicone_api_key,
            json_mode: !self.no_json_mode,
            counter_url: self.counter_url,
            counter_token: self.counter_token,
            counter_key: self.counter_key,
            http_timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
