use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use callsight_client::app::{RouterHandle, ViewRouterService};
use callsight_client::auth::AuthHandle;
use callsight_client::config::Config;
use callsight_client::domain::profile::OnboardingDetails;
use callsight_client::domain::router::{RenderedView, UserIntent};
use callsight_client::infrastructure::repositories::RestProfileRepository;
use callsight_client::infrastructure::rest::RestClient;

const HELP: &str = "commands: start | close | complete | profile | back | \
onboard <name>;<company>;<position> | signin <token> | signout | tab [name] | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "callsight_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let auth = AuthHandle::new();
    let client = Arc::new(
        RestClient::new(&config.backend, auth.subscribe()).context("Failed to build HTTP client")?,
    );
    let profiles = Arc::new(RestProfileRepository::new(client));
    let (nav_tx, nav_rx) = watch::channel(config.initial_tab.clone());

    let (router, service) = ViewRouterService::spawn(profiles, auth.subscribe(), nav_rx);
    tokio::spawn(render(router.subscribe()));

    match &config.access_token {
        Some(token) => {
            if let Err(e) = auth.sign_in_with_token(token, config.jwt_secret.as_deref()) {
                println!("error: {}", e);
            }
        }
        None => auth.sign_out(),
    }

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        let result = match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{}", HELP);
                continue;
            }
            "signin" => {
                auth.begin_check();
                auth.sign_in_with_token(rest.trim(), config.jwt_secret.as_deref())
                    .map_err(anyhow::Error::from)
            }
            "signout" => {
                auth.sign_out();
                Ok(())
            }
            "tab" => {
                let tab = Some(rest.trim().to_string()).filter(|t| !t.is_empty());
                nav_tx.send_replace(tab);
                Ok(())
            }
            "onboard" => onboard(&router, rest).await,
            other => match parse_intent(other) {
                Some(intent) => router.dispatch(intent).await.map_err(anyhow::Error::from),
                None => {
                    println!("unknown command: {}", other);
                    continue;
                }
            },
        };

        if let Err(e) = result {
            println!("error: {}", e);
        }
    }

    drop(router);
    drop(auth);
    service.await.context("View router task failed")?;
    Ok(())
}

fn parse_intent(command: &str) -> Option<UserIntent> {
    match command {
        "start" => Some(UserIntent::GetStarted),
        "close" => Some(UserIntent::CloseAuth),
        "complete" => Some(UserIntent::OnboardingComplete),
        "profile" => Some(UserIntent::ShowProfile),
        "back" => Some(UserIntent::Back),
        _ => None,
    }
}

async fn onboard(router: &RouterHandle, args: &str) -> anyhow::Result<()> {
    let mut fields = args.split(';').map(str::trim);
    let details = OnboardingDetails {
        full_name: fields.next().unwrap_or_default().to_string(),
        company_name: fields.next().unwrap_or_default().to_string(),
        position: fields.next().unwrap_or_default().to_string(),
        company_email: None,
        company_industry: None,
        use_cases: Vec::new(),
    };

    router.submit_onboarding(&details).await?;
    Ok(())
}

async fn render(mut views: watch::Receiver<RenderedView>) {
    loop {
        let view = *views.borrow_and_update();
        let actions: Vec<String> = view.intents().iter().map(ToString::to_string).collect();
        println!("[{}] {}", view, actions.join(", "));

        if views.changed().await.is_err() {
            break;
        }
    }
}
