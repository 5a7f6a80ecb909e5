use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use teleghost_wallet::config::{SyncMode, WalletConfig};
use teleghost_wallet::remote::{OfflineBackend, WalletApiClient, WalletBackend};
use teleghost_wallet::utils::{format_signed_amount, format_usd};
use teleghost_wallet::wallet::{
	LoggingEventHandler, Role, Transaction, WalletError, WalletStore, fixtures,
};

/// Smallest deposit the dashboards accept.
const MIN_DEPOSIT: Decimal = Decimal::TEN;

#[derive(Parser)]
#[command(name = "teleghost-wallet", about = "TeleGhost unified wallet client")]
struct Cli {
	/// Wallet endpoint URL (overrides TELEGHOST_WALLET_URL).
	#[arg(long)]
	endpoint: Option<String>,

	/// How mutations are reconciled with the endpoint: optimistic or confirmed.
	#[arg(long)]
	sync_mode: Option<SyncMode>,

	/// Skip the endpoint and work on the demo ledger.
	#[arg(long)]
	offline: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Show the current balance.
	Balance,
	/// List transactions, optionally as seen by one role.
	History {
		#[arg(long)]
		role: Option<Role>,
	},
	/// Show ledger totals, optionally for one role.
	Summary {
		#[arg(long)]
		role: Option<Role>,
	},
	/// Add funds to the wallet.
	Deposit { amount: Decimal },
	/// Spend on a campaign (advertiser).
	Spend {
		amount: Decimal,
		description: String,
		#[arg(long)]
		campaign: Option<String>,
	},
	/// Record channel earnings (publisher).
	Earn {
		amount: Decimal,
		description: String,
		#[arg(long)]
		channel: Option<String>,
	},
	/// Request a withdrawal.
	Withdraw { amount: Decimal },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.with_target(false)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_file(false)
		.with_line_number(false)
		.with_writer(std::io::stderr)
		.init();

	let cli = Cli::parse();

	let mut config = match WalletConfig::from_env() {
		Ok(config) => config,
		Err(e) => {
			error!("Invalid configuration: {}", e);
			return ExitCode::FAILURE;
		}
	};
	if let Some(endpoint) = cli.endpoint {
		config.endpoint_url = endpoint;
	}
	if let Some(sync_mode) = cli.sync_mode {
		config.sync_mode = sync_mode;
	}

	let backend: Arc<dyn WalletBackend> = if cli.offline {
		Arc::new(OfflineBackend)
	} else {
		match WalletApiClient::from_config(&config) {
			Ok(client) => Arc::new(client),
			Err(e) => {
				error!("Failed to create wallet client: {}", e);
				return ExitCode::FAILURE;
			}
		}
	};

	info!(
		"Using wallet endpoint {} ({} sync)",
		config.endpoint_url, config.sync_mode
	);

	let mut store = WalletStore::from_config(backend, fixtures::demo_transactions(), &config);
	store.register_handler(Box::new(LoggingEventHandler));
	store.load().await;

	let result = run(&mut store, cli.command).await;
	store.flush_notifications().await;

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("{}", e);
			ExitCode::FAILURE
		}
	}
}

async fn run(store: &mut WalletStore, command: Command) -> Result<(), WalletError> {
	match command {
		Command::Balance => {
			println!("{}", format_usd(store.balance()));
		}
		Command::History { role } => {
			let transactions: Vec<&Transaction> = match role {
				Some(role) => store.transactions_by_role(role),
				None => store.transactions().iter().collect(),
			};
			for tx in transactions {
				print_transaction(tx);
			}
		}
		Command::Summary { role } => {
			let summary = match role {
				Some(role) => store.role_summary(role),
				None => store.summary(),
			};
			println!("{}", summary.summary());
		}
		Command::Deposit { amount } => {
			if amount < MIN_DEPOSIT {
				return Err(WalletError::InvalidAmount(amount));
			}
			let tx = store.add_funds(amount).await?;
			print_transaction(&tx);
			println!("Balance: {}", format_usd(store.balance()));
		}
		Command::Spend {
			amount,
			description,
			campaign,
		} => {
			let tx = store.spend_funds(amount, description, campaign).await?;
			print_transaction(&tx);
			println!("Balance: {}", format_usd(store.balance()));
		}
		Command::Earn {
			amount,
			description,
			channel,
		} => {
			let tx = store.add_earnings(amount, description, channel).await?;
			print_transaction(&tx);
			println!("Balance: {}", format_usd(store.balance()));
		}
		Command::Withdraw { amount } => {
			let tx = store.request_withdrawal(amount).await?;
			print_transaction(&tx);
			println!(
				"Balance: {} (withdrawal pending)",
				format_usd(store.balance())
			);
		}
	}

	Ok(())
}

fn print_transaction(tx: &Transaction) {
	println!(
		"{}  {:>12}  {:<10} {:<9} {}",
		tx.date.format("%Y-%m-%d %H:%M"),
		format_signed_amount(tx),
		tx.transaction_type.as_str(),
		tx.status.to_string(),
		tx.description
	);
}
