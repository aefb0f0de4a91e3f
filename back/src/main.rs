mod v1;

use std::{
    fs, io,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{signal, sync::Mutex, time};

/// Development JSON document store for the Join board.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "JOIN_PORT", default_value_t = 7890)]
    port: u16,

    /// File the document is persisted to.
    #[arg(long, env = "JOIN_DATA", default_value = "data.ron")]
    data: PathBuf,

    /// PEM certificate; serves TLS together with `--key`.
    #[arg(long, env = "SSL_CERT", requires = "key")]
    cert: Option<PathBuf>,

    /// PEM private key.
    #[arg(long, env = "SSL_KEY", requires = "cert")]
    key: Option<PathBuf>,

    /// Seconds between background saves.
    #[arg(long, default_value_t = 300)]
    save_interval: u64,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let state = Arc::new(AppState::load(&args.data)?);

    tokio::spawn({
        let state = state.clone();
        let data = args.data.clone();
        let period = time::Duration::from_secs(args.save_interval.max(1));

        async move {
            loop {
                time::sleep(period).await;
                if let Err(err) = state.store(&data).await {
                    tracing::error!("Failed to store data: {:?}", err);
                }
            }
        }
    });

    let app = Router::new()
        .nest("/api/v1", v1::router())
        .with_state(state.clone());

    let addr = SocketAddr::from(([0; 4], args.port));
    let serve = async {
        match (&args.cert, &args.key) {
            (Some(cert), Some(key)) => {
                let config = RustlsConfig::from_pem_file(cert, key).await?;
                tracing::info!(%addr, "serving over https");

                axum_server::bind_rustls(addr, config)
                    .serve(app.into_make_service())
                    .await
            }
            _ => {
                tracing::info!(%addr, "serving over http");

                axum_server::bind(addr)
                    .serve(app.into_make_service())
                    .await
            }
        }
    };

    tokio::select! {
        result = serve => result?,
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("shutting down");
        }
    }

    state.store(&args.data).await?;

    Ok(())
}

/// The whole document, plus a counter bumped by every write.
#[derive(Default, Debug)]
pub struct AppState {
    pub generation: AtomicU64,
    pub root: Mutex<Value>,
}

impl AppState {
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => eyre::bail!(err),
        };
        let data: DataOwned = ron::de::from_reader(file)?;

        match data {
            DataOwned::V1 { root } => Ok(Self::from_v1(root)),
        }
    }

    fn from_v1(root: Value) -> Self {
        Self {
            generation: AtomicU64::new(0),
            root: Mutex::new(root),
        }
    }

    /// Bumps the generation, returning the new value.
    pub fn increment_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub async fn store(&self, path: &Path) -> eyre::Result<()> {
        let root = self.root.lock().await;
        let data = DataBorrowed::V1 { root: &root };

        let file = fs::File::create(path)?;
        let mut ron = ron::Serializer::new(file, Some(Default::default()))?;
        data.serialize(&mut ron)?;

        Ok(())
    }
}

#[derive(Serialize)]
enum DataBorrowed<'a> {
    V1 { root: &'a Value },
}

#[derive(Deserialize)]
enum DataOwned {
    V1 { root: Value },
}
