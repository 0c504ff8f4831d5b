//! Subcommand dispatch

use crate::args::{Command, MarketCommand, OrderArgs};
use crate::output::{render_text, render_value};
use anyhow::{Context, Result};
use csutl_rest::{CoinSpotClient, MarketOrder, OrderQuery, PostOptions, Transport};
use std::io::Read;
use tracing::debug;

/// Run a subcommand and return the text to print
///
/// `stdin` supplies the payload for `post`.
pub fn run<T: Transport>(
    command: &Command,
    client: &CoinSpotClient<T>,
    raw_output: bool,
    mut stdin: impl Read,
) -> Result<String> {
    debug!(?command, "Running command");

    match command {
        Command::Get { url } => {
            let response = client.get(url, raw_output)?;
            render_text(&response, raw_output)
        }
        Command::Post { url, raw_input } => {
            let mut payload = String::new();
            stdin
                .read_to_string(&mut payload)
                .context("failed to read payload from stdin")?;

            let options = PostOptions {
                raw_payload: *raw_input,
                raw_output,
            };
            let response = client.post(url, payload, options)?;
            render_text(&response, raw_output)
        }
        Command::Balance { cointype } => {
            let response = client.account().balances(cointype.as_deref())?;
            render_text(&response, raw_output)
        }
        Command::PriceHistory {
            cointype,
            age,
            stats,
            reference_price,
        } => {
            let market = client.market();
            if *stats {
                let summary = market.price_history_stats(cointype, *age, *reference_price)?;
                render_value(&summary, raw_output)
            } else {
                let series = market.price_history(cointype, *age)?;
                render_value(&series, raw_output)
            }
        }
        Command::OrderHistory(filter) => {
            let response = client.account().order_history(&OrderQuery::from(filter))?;
            render_text(&response, raw_output)
        }
        Command::Market { command } => match command {
            MarketCommand::Orders { filter, completed } => {
                let response = client
                    .account()
                    .market_orders(&OrderQuery::from(filter), *completed)?;
                render_text(&response, raw_output)
            }
            MarketCommand::Buy(order) => {
                let response = client.trading().market_buy(&market_order(order))?;
                render_text(&response, raw_output)
            }
            MarketCommand::Sell(order) => {
                let response = client.trading().market_sell(&market_order(order))?;
                render_text(&response, raw_output)
            }
        },
    }
}

fn market_order(args: &OrderArgs) -> MarketOrder {
    let order = MarketOrder::new(args.cointype.clone(), args.amount, args.amount_type.into());
    match args.rate {
        Some(rate) => order.with_rate(rate),
        None => order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use clap::Parser;
    use csutl_rest::{ClientConfig, Headers, HttpMethod, RestResult};
    use std::sync::Mutex;

    const OK_RESPONSE: &str = r#"{"status":"ok","message":"ok","test":"response"}"#;

    type Sent = Vec<(HttpMethod, String, Option<String>)>;

    struct Recorder {
        sent: Mutex<Sent>,
        response: String,
    }

    impl Transport for Recorder {
        fn send(
            &self,
            method: HttpMethod,
            url: &str,
            _: &Headers,
            body: Option<&str>,
        ) -> RestResult<String> {
            self.sent
                .lock()
                .unwrap()
                .push((method, url.to_string(), body.map(str::to_string)));
            Ok(self.response.clone())
        }
    }

    fn run_args(argv: &[&str], response: &str, stdin: &str) -> (Result<String>, Sent) {
        let args = Args::try_parse_from(argv).unwrap();
        std::env::set_var("CSUTL_CLI_TEST_API_KEY", "apikey");
        std::env::set_var("CSUTL_CLI_TEST_API_SECRET", "apisecret");

        let config = ClientConfig::new()
            .with_base_url("https://coinspot.test")
            .with_credential_vars("CSUTL_CLI_TEST_API_KEY", "CSUTL_CLI_TEST_API_SECRET")
            .with_raw_output(args.raw_output);
        let transport = Recorder {
            sent: Mutex::new(Vec::new()),
            response: response.to_string(),
        };
        let client = CoinSpotClient::with_transport(transport, config);

        let result = run(&args.command, &client, args.raw_output, stdin.as_bytes());
        let sent = client.transport().sent.lock().unwrap().clone();
        (result, sent)
    }

    #[test]
    fn test_get_pretty_output() {
        let (result, sent) = run_args(&["csutl", "get", "/pubapi/v2/latest"], OK_RESPONSE, "");

        assert_eq!(result.unwrap(), "{\n    \"test\": \"response\"\n}");
        assert_eq!(sent[0].0, HttpMethod::Get);
        assert_eq!(sent[0].1, "https://coinspot.test/pubapi/v2/latest");
    }

    #[test]
    fn test_get_raw_output() {
        let (result, _) = run_args(
            &["csutl", "--raw-output", "get", "/pubapi/v2/latest"],
            OK_RESPONSE,
            "",
        );
        assert_eq!(result.unwrap(), OK_RESPONSE);
    }

    #[test]
    fn test_post_reads_stdin() {
        let (result, sent) = run_args(
            &["csutl", "post", "/nowhere"],
            OK_RESPONSE,
            r#"{"test":"other"}"#,
        );
        assert!(result.is_ok());

        let body: serde_json::Value = serde_json::from_str(sent[0].2.as_deref().unwrap()).unwrap();
        assert_eq!(body["test"], "other");
        assert!(body.get("nonce").is_some());
    }

    #[test]
    fn test_post_raw_input() {
        let (result, sent) = run_args(
            &["csutl", "post", "--raw-input", "/nowhere"],
            OK_RESPONSE,
            "{\"nonce\":\"1\"}",
        );
        assert!(result.is_ok());
        assert_eq!(
            sent[0].2.as_deref(),
            Some("{\"nonce\":\"1\"}")
        );
    }

    #[test]
    fn test_api_failure_is_error() {
        let (result, _) = run_args(
            &["csutl", "balance"],
            r#"{"status":"error","message":"invalid key"}"#,
            "",
        );
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("invalid key"));
    }

    #[test]
    fn test_price_history_stats_output() {
        let (result, _) = run_args(
            &["csutl", "--raw-output", "price_history", "-s", "-a", "4h", "BTC"],
            "[[1700000000000, 100.0], [1700003600000, 110.0], [1700007200000, 90.0], [1700010800000, 120.0]]",
            "",
        );

        let stats: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(stats["width"], 30.0);
        assert_eq!(stats["growth"], 20.0);
        assert_eq!(stats["quartiles"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_market_sell_with_rate() {
        let (result, sent) = run_args(
            &["csutl", "market", "sell", "BTC", "coin", "0.5", "-r", "1000"],
            OK_RESPONSE,
            "",
        );
        assert!(result.is_ok());

        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "https://coinspot.test/api/v2/my/sell");
    }
}
