use anyhow::{bail, Result};
use clap::Args;
use handoff_common::{Config, ConsoleNotifier, NoopNotifier, Notifier, PaymentForm};
use payment_client::{Checkout, PaymentClient, ValidationPolicy};

#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub credit_card_number: String,

    #[arg(long, default_value = "")]
    pub expiration_date: String,

    #[arg(long, default_value = "")]
    pub ccv: String,

    #[arg(long, default_value = "")]
    pub shipping_address: String,

    /// Check the fields locally before sending
    #[arg(long)]
    pub strict: bool,
}

impl CheckoutArgs {
    fn form(&self) -> PaymentForm {
        PaymentForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            credit_card_number: self.credit_card_number.clone(),
            expiration_date: self.expiration_date.clone(),
            ccv: self.ccv.clone(),
            shipping_address: self.shipping_address.clone(),
        }
    }
}

pub async fn run(args: CheckoutArgs, quiet: bool) -> Result<()> {
    if quiet {
        click(args, NoopNotifier).await
    } else {
        click(args, ConsoleNotifier).await
    }
}

async fn click<N: Notifier>(args: CheckoutArgs, notifier: N) -> Result<()> {
    let config = Config::from_env()?;
    let policy = if args.strict {
        ValidationPolicy::Strict
    } else {
        ValidationPolicy::SendAsIs
    };

    let mut checkout =
        Checkout::new(PaymentClient::new(&config.payment_base_url), notifier).with_policy(policy);

    match checkout.click(&args.form()).await.success() {
        Some(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        None => bail!("payment was not accepted"),
    }
}
