use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "shopchat", version, about = "Chat with the shopping assistant webhook")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat; one message per line, `/quit` to leave.
    Chat {
        #[command(flatten)]
        endpoint: EndpointArgs,

        /// Pause before showing each reply, in milliseconds.
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,

        /// Remove emoji from displayed message text.
        #[arg(long, default_value_t = false)]
        strip_emoji: bool,
    },

    /// Send a single message and print the reply.
    Send {
        /// Message text.
        message: String,

        #[command(flatten)]
        endpoint: EndpointArgs,

        /// Print the normalized reply as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the version.
    Version,
}

#[derive(Args, Debug)]
pub struct EndpointArgs {
    /// Webhook URL (overrides `SHOPCHAT_WEBHOOK_URL`).
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
}
