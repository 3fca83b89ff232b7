use aws_config::BehaviorVersion;
use aws_sdk_lambda::Client;
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

mod event;
use event::{http_api_event, BodyKind, ACTIONS};

#[derive(Default)]
struct Stats {
    success_count: usize,
    error_count: usize,
    delete_count: usize,
    total_latency_ms: f64,
}

impl Stats {
    fn avg_latency_ms(&self) -> Option<f64> {
        (self.success_count > 0).then(|| self.total_latency_ms / self.success_count as f64)
    }

    fn summary(&self, invocations: usize) -> String {
        let mut lines = vec![
            format!("Completed {invocations} invocations"),
            String::new(),
            "Results:".to_string(),
            format!("  Success: {}", self.success_count),
            format!("  Errors:  {}", self.error_count),
            format!("  Deletes: {}", self.delete_count),
        ];
        if let Some(avg) = self.avg_latency_ms() {
            lines.push(format!("  Avg latency: {avg:.3}ms"));
        }
        lines.join("\n")
    }
}

#[derive(Deserialize)]
struct HttpResponse {
    #[serde(rename = "statusCode")]
    status_code: u16,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Parser, Debug)]
#[command(name = "invoke-test")]
#[command(about = "Invoke the HTTP function with random users, actions and bodies")]
struct Args {
    /// Lambda function name
    function: String,

    /// Number of iterations to run
    #[arg(long, default_value = "100")]
    iters: usize,

    /// Number of parallel threads
    #[arg(long, default_value = "1")]
    threads: usize,

    /// Number of distinct users (user1 to userN)
    #[arg(long, default_value = "10")]
    users: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Batch {
    thread_id: usize,
    start: usize,
    end: usize,
    total: usize,
    num_users: u32,
}

impl Batch {
    /// Splits invocations `1..=total` into `workers` contiguous batches; the
    /// last batch takes the remainder.
    fn split(total: usize, workers: usize, num_users: u32) -> Vec<Batch> {
        let per_worker = total / workers;
        (0..workers)
            .map(|w| {
                let start = w * per_worker + 1;
                let end = if w + 1 == workers { total } else { start + per_worker - 1 };
                Batch {
                    thread_id: w + 1,
                    start,
                    end,
                    total,
                    num_users,
                }
            })
            .collect()
    }
}

async fn run_invocations(
    client: Arc<Client>,
    function_name: String,
    batch: Batch,
    stats: Arc<Mutex<Stats>>,
) {
    let mut rng = StdRng::from_entropy();

    for i in batch.start..=batch.end {
        let user_id = format!("user{}", rng.gen_range(1..=batch.num_users));
        let action = ACTIONS[rng.gen_range(0..ACTIONS.len())];
        let body_kind = BodyKind::random(&mut rng);

        let payload = http_api_event(&user_id, action, &body_kind.body(&user_id));
        let payload = match serde_json::to_vec(&payload) {
            Ok(bytes) => bytes,
            Err(e) => {
                stats.lock().await.error_count += 1;
                eprintln!("[Thread {}: {}/{}] Error encoding event: {}", batch.thread_id, i, batch.total, e);
                continue;
            }
        };

        let started = Instant::now();
        let result = client
            .invoke()
            .function_name(&function_name)
            .payload(aws_sdk_lambda::primitives::Blob::new(payload))
            .send()
            .await;
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(response) => {
                let response_payload = response
                    .payload()
                    .map(|b| String::from_utf8_lossy(b.as_ref()).to_string())
                    .unwrap_or_else(|| "No response".to_string());

                let parsed = serde_json::from_str::<HttpResponse>(&response_payload).ok();
                let is_success = parsed.as_ref().is_some_and(|r| r.status_code == 200);
                let shown = parsed
                    .and_then(|r| r.body)
                    .unwrap_or(response_payload);

                {
                    let mut stats = stats.lock().await;
                    if is_success {
                        stats.success_count += 1;
                        stats.total_latency_ms += latency_ms;
                    } else {
                        stats.error_count += 1;
                    }
                    if action == "delete" {
                        stats.delete_count += 1;
                    }
                }

                println!(
                    "[Thread {}: {}/{}] {} as {} ({:?} body) => {}",
                    batch.thread_id, i, batch.total, action, user_id, body_kind, shown
                );
            }
            Err(e) => {
                stats.lock().await.error_count += 1;

                eprintln!(
                    "[Thread {}: {}/{}] Error invoking {} as {}: {}",
                    batch.thread_id, i, batch.total, action, user_id, e
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    anyhow::ensure!(args.threads > 0, "--threads must be at least 1");
    anyhow::ensure!(args.users > 0, "--users must be at least 1");

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let client = Arc::new(Client::new(&sdk_config));
    let stats = Arc::new(Mutex::new(Stats::default()));

    let batches = Batch::split(args.iters, args.threads, args.users);
    println!("Sending {} events to {} from {} task(s)", args.iters, args.function, batches.len());

    let mut tasks: JoinSet<()> = batches
        .into_iter()
        .map(|batch| run_invocations(Arc::clone(&client), args.function.clone(), batch, Arc::clone(&stats)))
        .collect();

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            eprintln!("Task failed: {e}");
        }
    }

    println!("{}", stats.lock().await.summary(args.iters));
    Ok(())
}
