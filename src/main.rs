//! contract-scripts
//!
//! Deploys the project's precompiled contracts and drives the deployed ones:
//! minting, donations, subscription creation and payment, and event reports.
//!
//! # Configuration
//! - `contract-scripts.toml` (or `--config PATH`): addresses, windows, deployments
//! - `BNBT_RPC_URL`: node endpoint
//! - `PRIVATE_KEY`: signer key for every write
//! - `ETHERSCAN_API_KEY`: explorer API key for `abi`
//!
//! Exits with 0 on success and 1 on any failure, printed to stderr.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use contract_scripts::blockchain::BlockchainClient;
use contract_scripts::config::{self, ScriptsConfig};
use contract_scripts::deploy::{self, DeployError};
use contract_scripts::events::{EventKind, EventReconciler};
use contract_scripts::explorer::{ExplorerClient, ExplorerError};
use contract_scripts::nft;
use contract_scripts::observability::logging;
use contract_scripts::payments::{
    DonationOutcome, DonationWorkflow, PaymentOutcome, PaymentRequest, PaymentWorkflow, NATIVE_COIN,
};
use contract_scripts::subscriptions::{
    self, hash_id, hex_id, DiscountSchedule, DiscountTier, SubscriptionPlan,
};
use contract_scripts::{ScriptError, ScriptResult, Session};

#[derive(Parser)]
#[command(name = "contract-scripts")]
#[command(about = "Deploy and interact with the MainNFT, Subscriptions and PublicDonation contracts", long_about = None)]
struct Cli {
    /// Config file (defaults to ./contract-scripts.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pay for one or more periods of a subscription
    Pay {
        #[arg(long)]
        author: U256,
        #[arg(long)]
        subscription_id: U256,
        /// Token to pay with; omit to pay in the native coin
        #[arg(long)]
        token: Option<Address>,
        #[arg(long, default_value_t = 1)]
        periods: u64,
    },
    /// Create a subscription (native coin unless --token is given)
    CreateSubscription {
        /// Numeric id, left-padded to 32 bytes
        #[arg(long, conflicts_with = "seed")]
        id: Option<u64>,
        /// Hash this string into the id instead
        #[arg(long)]
        seed: Option<String>,
        #[arg(long)]
        author: U256,
        /// Recurring instead of one-time
        #[arg(long)]
        regular: bool,
        /// Payment period in seconds
        #[arg(long)]
        period: u64,
        /// Price per period in base units
        #[arg(long)]
        price: U256,
        /// Accepted token (repeatable)
        #[arg(long = "token")]
        tokens: Vec<Address>,
        /// Discount tier as <periods>:<ppm> (repeatable, increasing periods)
        #[arg(long = "discount")]
        discounts: Vec<DiscountTier>,
    },
    /// Report recent subscription events
    Events {
        /// Only this event kind
        #[arg(long)]
        kind: Option<EventKind>,
    },
    /// Mint a MainNFT token if the signer holds none
    Mint,
    /// List the signer's MainNFT tokens
    Tokens,
    /// List the tokens an author accepts for donations
    DonationTokens {
        #[arg(long)]
        author: U256,
    },
    /// Donate native coin to an author (amount in ether units)
    DonateEth {
        #[arg(long)]
        author: U256,
        #[arg(long)]
        amount: String,
    },
    /// Donate an ERC-20 token to an author (amount in 18-decimal units)
    DonateToken {
        #[arg(long)]
        token: Address,
        #[arg(long)]
        author: U256,
        #[arg(long)]
        amount: String,
    },
    /// Deploy a contract listed under [[deployments]]
    Deploy { name: String },
    /// Fetch a verified contract ABI from the explorer
    Abi { address: Address },
    /// Print the 32-byte id for a number or string
    HashId { value: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Script failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ScriptResult<()> {
    // Before the config, so `.env` can supply BNBT_RPC_URL.
    let env_file = config::load_env_file(None);
    let config = config::load_or_default(cli.config.as_deref())?;
    logging::init_logging(&config.observability.log_level);
    if let Err(e) = env_file {
        tracing::warn!(error = %e, "Ignoring .env file");
    }

    match cli.command {
        Commands::HashId { value } => {
            let id = match value.parse::<u64>() {
                Ok(n) => hex_id(n),
                Err(_) => hash_id(&value),
            };
            println!("{}", id);
        }
        Commands::Abi { address } => {
            let explorer = ExplorerClient::new(&config.explorer)?;
            let abi = explorer.fetch_abi(address).await?;
            let pretty = serde_json::to_string_pretty(&abi).map_err(ExplorerError::from)?;
            println!("{}", pretty);
        }
        Commands::Events { kind } => report_events(config, kind).await?,
        Commands::Pay {
            author,
            subscription_id,
            token,
            periods,
        } => {
            let session = connect(config).await?;
            let request = PaymentRequest {
                author,
                subscription_id,
                token: token.unwrap_or(NATIVE_COIN),
                periods,
            };
            pay(&session, &request).await?;
        }
        Commands::CreateSubscription {
            id,
            seed,
            author,
            regular,
            period,
            price,
            tokens,
            discounts,
        } => {
            let hex_id = match (id, seed) {
                (Some(id), _) => hex_id(id),
                (None, Some(seed)) => hash_id(&seed),
                (None, None) => hash_id(&chrono::Utc::now().timestamp_millis().to_string()),
            };
            let plan = SubscriptionPlan {
                hex_id,
                author,
                recurring: regular,
                payment_period: period,
                price,
                tokens,
                discounts: DiscountSchedule::new(discounts)?,
            };
            let session = connect(config).await?;
            let contract = session.subscriptions()?;
            let tx_hash = subscriptions::create_subscription(
                &contract,
                session.waiter(),
                &plan,
                session.confirmations(),
            )
            .await?;
            println!("hexId: {}", plan.hex_id);
            println!("subscription creation hash: {}", tx_hash);
        }
        Commands::Mint => {
            let session = connect(config).await?;
            let contract = session.main_nft()?;
            let minted = nft::mint_if_missing(
                &contract,
                session.waiter(),
                session.owner(),
                session.confirmations(),
            )
            .await?;
            match minted {
                Some(tx_hash) => println!("safeMint hash: {}", tx_hash),
                None => println!("Signer already holds a token"),
            }
        }
        Commands::Tokens => {
            let session = connect(config).await?;
            let contract = session.main_nft()?;
            let owned = nft::owned_tokens(&contract, session.owner()).await?;
            let ids: Vec<String> = owned.token_ids.iter().map(ToString::to_string).collect();
            println!("User token balance: {}, tokens: {}", owned.balance, ids.join(","));
        }
        Commands::DonationTokens { author } => {
            let session = connect(config).await?;
            let contract = session.main_nft()?;
            for address in nft::donation_tokens(&contract, author).await? {
                println!("{}", address);
            }
        }
        Commands::DonateEth { author, amount } => {
            let value = parse_amount(&amount)?;
            let session = connect(config).await?;
            let donations = session.donations()?;
            let tokens = session.tokens();
            let workflow = DonationWorkflow::new(
                &donations,
                &tokens,
                session.waiter(),
                session.owner(),
                session.confirmations(),
            );
            let outcome = workflow.donate_eth(author, value).await?;
            if let DonationOutcome::Donated { donation, .. } = &outcome {
                println!("donate hash: {}", donation);
            }
            println!("Donation result: {}", outcome.message());
        }
        Commands::DonateToken {
            token,
            author,
            amount,
        } => {
            let value = parse_amount(&amount)?;
            let session = connect(config).await?;
            let donations = session.donations()?;
            let tokens = session.tokens();
            let workflow = DonationWorkflow::new(
                &donations,
                &tokens,
                session.waiter(),
                session.owner(),
                session.confirmations(),
            );
            let outcome = workflow.donate_token(token, value, author).await?;
            if let DonationOutcome::Donated { donation, .. } = &outcome {
                println!("donateToken hash: {}", donation);
            }
            println!("Donation result: {}", outcome.message());
        }
        Commands::Deploy { name } => {
            let deployment = config
                .deployment(&name)
                .cloned()
                .ok_or(DeployError::UnknownDeployment(name))?;
            let session = connect(config).await?;
            let report = deploy::deploy(session.client(), session.waiter(), &deployment).await?;
            println!("owner address: {}", session.owner());
            println!("{}", report);
        }
    }

    Ok(())
}

async fn connect(config: ScriptsConfig) -> ScriptResult<Session> {
    let session = Session::connect(config).await?;
    println!("Address signer: {}", session.owner());
    Ok(session)
}

async fn report_events(config: ScriptsConfig, kind: Option<EventKind>) -> ScriptResult<()> {
    let contract = config.contracts.subscriptions_address()?;
    let client = BlockchainClient::new(config.chain.clone()).await?;
    let reconciler = EventReconciler::new(&client, contract, &config.events);

    let reports = match kind {
        Some(kind) => {
            let head = client.get_block_number().await?;
            vec![reconciler.scan(kind, head).await?]
        }
        None => reconciler.scan_all().await?,
    };
    for report in reports {
        println!("{}", report);
    }
    Ok(())
}

async fn pay(session: &Session, request: &PaymentRequest) -> ScriptResult<()> {
    let subscriptions = session.subscriptions()?;
    let tokens = session.tokens();
    let workflow = PaymentWorkflow::new(
        &subscriptions,
        &tokens,
        session.waiter(),
        session.owner(),
        session.confirmations(),
    );

    match workflow.pay(request).await? {
        PaymentOutcome::Paid {
            quote,
            approval,
            payment,
        } => {
            if let Some(approval) = approval {
                println!("approve hash: {}", approval);
            }
            println!("subscriptionPayment hash: {} (amount {})", payment, quote.amount);
        }
        PaymentOutcome::InsufficientBalance { required, available } => {
            println!(
                "Balance too low for subscriptions: required {}, available {}",
                required, available
            );
        }
    }
    Ok(())
}

fn parse_amount(value: &str) -> ScriptResult<U256> {
    parse_ether(value).map_err(|e| ScriptError::Amount {
        value: value.to_string(),
        message: e.to_string(),
    })
}
