use anyhow::bail;
use backend_client::{BackendClient, BackendClientTrait, Config, PromptResult, WorkspaceSummary};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console_state::ConsoleController;
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "fileops-cli")]
#[command(about = "CLI for the AI file-operation backend")]
#[command(version)]
struct Cli {
    /// Backend base URL; overrides config.toml and environment resolution
    #[arg(long)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check backend and prompt-service health
    Health,
    /// List workspaces
    List,
    /// Create a new workspace
    Create {
        /// Workspace name
        name: String,
    },
    /// Show a single workspace
    Info {
        /// Workspace id
        workspace_id: String,
    },
    /// List files in a workspace
    Files {
        /// Workspace id
        workspace_id: String,
    },
    /// Submit a natural-language prompt
    Prompt {
        /// Workspace to run against; defaults to the first listed one
        #[arg(long)]
        workspace: Option<String>,
        /// Natural-language instruction, e.g. "create hello.py"
        prompt: String,
    },
    /// Interactive console session
    Console,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::new();
    if let Some(api_base) = cli.api_base {
        config.api_base = Some(api_base);
    }
    let client = BackendClient::from_config(&config);
    log::debug!("using backend at {}", client.base_url());

    match cli.command {
        Commands::Health => check_health(&client).await,
        Commands::List => list_workspaces(&client).await,
        Commands::Create { name } => create_workspace(&client, &name).await,
        Commands::Info { workspace_id } => show_workspace(&client, &workspace_id).await,
        Commands::Files { workspace_id } => list_files(&client, &workspace_id).await,
        Commands::Prompt { workspace, prompt } => run_prompt(client, workspace, &prompt).await,
        Commands::Console => run_console(client).await,
    }
}

async fn check_health(client: &BackendClient) -> anyhow::Result<()> {
    match client.check_health().await {
        Ok(health) => println!("{}", format!("backend: {}", health.status).green()),
        Err(err) => println!("{}", format!("backend: {err}").red()),
    }

    match client.check_prompt_health().await {
        Ok(health) => {
            let llm = if health.llm_available {
                "available".green()
            } else {
                "unavailable".red()
            };
            println!(
                "{} (llm {}, method {})",
                format!("prompt service: {}", health.status).green(),
                llm,
                health.method
            );
        }
        Err(err) => println!("{}", format!("prompt service: {err}").red()),
    }
    Ok(())
}

async fn list_workspaces(client: &BackendClient) -> anyhow::Result<()> {
    let workspaces = client.list_workspaces().await?;
    if workspaces.is_empty() {
        println!("{}", "No workspaces found. Create one to get started!".dimmed());
        return Ok(());
    }
    print_workspaces(&workspaces, None);
    Ok(())
}

async fn create_workspace(client: &BackendClient, name: &str) -> anyhow::Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("workspace name must not be blank");
    }
    let created = client.create_workspace(name).await?;
    println!(
        "{}",
        format!("Created workspace {} ({})", name, created.workspace_id).green()
    );
    Ok(())
}

async fn show_workspace(client: &BackendClient, workspace_id: &str) -> anyhow::Result<()> {
    let workspace = client.get_workspace(workspace_id).await?;
    println!("{}", workspace.name.bold());
    println!("  id:         {}", workspace.id);
    println!("  created at: {}", workspace.created_at);
    println!("  files:      {}", workspace.file_count);
    println!("  size:       {} KB", workspace.size_bytes / 1024);
    Ok(())
}

async fn list_files(client: &BackendClient, workspace_id: &str) -> anyhow::Result<()> {
    let files = client.list_files(workspace_id).await?;
    if files.is_empty() {
        println!("{}", "workspace is empty".dimmed());
        return Ok(());
    }
    for file in files {
        if file.is_directory {
            println!("{}/", file.path.blue());
        } else {
            println!("{}  {}", file.path, format!("{} B", file.size).dimmed());
        }
    }
    Ok(())
}

async fn run_prompt(
    client: BackendClient,
    workspace: Option<String>,
    prompt: &str,
) -> anyhow::Result<()> {
    let controller = ConsoleController::new(client);

    controller.load_workspaces().await;
    if let Some(workspace_id) = workspace {
        controller.select_workspace(workspace_id).await;
    }

    let state = controller.state().await;
    if let Some(err) = &state.banner_error {
        bail!("{err}");
    }
    let Some(selected) = state.selected_workspace else {
        bail!("no workspace available; create one first");
    };
    println!("{}", format!("Prompting workspace {selected}...").cyan());

    controller.open_prompt_modal().await;
    controller.set_prompt_draft(prompt).await;
    controller.submit_prompt().await;
    // let the post-success refresh land so counts are current
    controller.wait_for_refresh().await;

    let state = controller.state().await;
    if let Some(err) = &state.prompt_modal.error {
        bail!("{err}");
    }
    if let Some(result) = &state.prompt_modal.response {
        print_result(result);
    }
    Ok(())
}

async fn run_console(client: BackendClient) -> anyhow::Result<()> {
    // clone kept for side queries (files, health) that bypass the UI state
    let side_client = client.clone();
    let controller = ConsoleController::new(client);

    println!("{}", "AI File Operations Console".cyan().bold());
    println!(
        "{}",
        "Commands: ls, use <id>, new <name>, files, health, quit. Anything else is a prompt."
            .dimmed()
    );
    println!();

    controller.load_workspaces().await;
    render_state(&controller).await;

    loop {
        print!("{} ", ">".cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "ls" => {
                controller.load_workspaces().await;
                render_state(&controller).await;
            }
            "use" => {
                controller.select_workspace(rest).await;
                render_state(&controller).await;
            }
            "new" => {
                controller.create_workspace(rest).await;
                render_state(&controller).await;
            }
            "files" => {
                let state = controller.state().await;
                match state.selected_workspace {
                    Some(id) => {
                        if let Err(err) = list_files(&side_client, &id).await {
                            println!("{}", err.to_string().red());
                        }
                    }
                    None => println!("{}", "no workspace selected".dimmed()),
                }
            }
            "health" => {
                check_health(&side_client).await?;
            }
            _ => {
                submit_console_prompt(&controller, input).await;
            }
        }
    }

    println!("{}", "bye".dimmed());
    Ok(())
}

async fn submit_console_prompt<B>(controller: &ConsoleController<B>, prompt: &str)
where
    B: BackendClientTrait + 'static,
{
    let state = controller.state().await;
    if state.selected_workspace.is_none() {
        println!("{}", "no workspace selected; `new <name>` creates one".dimmed());
        return;
    }

    controller.open_prompt_modal().await;
    controller.set_prompt_draft(prompt).await;
    controller.submit_prompt().await;
    controller.wait_for_refresh().await;

    let state = controller.state().await;
    if let Some(err) = &state.prompt_modal.error {
        println!("{}", err.to_string().red());
    } else if let Some(result) = &state.prompt_modal.response {
        print_result(result);
    }
    controller.close_prompt_modal().await;
}

async fn render_state<B>(controller: &ConsoleController<B>)
where
    B: BackendClientTrait + 'static,
{
    let state = controller.state().await;
    if let Some(err) = &state.banner_error {
        println!("{}", err.red());
    }
    if state.workspaces.is_empty() {
        println!("{}", "No workspaces found. Create one to get started!".dimmed());
        return;
    }
    print_workspaces(&state.workspaces, state.selected_workspace.as_deref());
}

fn print_workspaces(workspaces: &[WorkspaceSummary], selected: Option<&str>) {
    for workspace in workspaces {
        let marker = if selected == Some(workspace.id.as_str()) {
            "*".cyan().bold()
        } else {
            " ".normal()
        };
        println!(
            "{} {}  {}",
            marker,
            workspace.name.bold(),
            format!(
                "[{}] {} files • {} KB",
                workspace.id,
                workspace.file_count,
                workspace.size_bytes / 1024
            )
            .dimmed()
        );
    }
}

fn print_result(result: &PromptResult) {
    let status = if result.success {
        "Success".green()
    } else {
        "Failed".red()
    };
    println!("Status: {status}");
    println!("Confidence: {}%", (result.confidence * 100.0).round());
    if !result.method.is_empty() {
        println!("Method: {}", result.method);
    }

    if !result.operations.is_empty() {
        println!("{}", "Operations:".bold());
        for operation in &result.operations {
            println!("  {} {}", "✅".green(), operation);
        }
    }

    if !result.errors.is_empty() {
        println!("{}", "Errors:".bold());
        for error in &result.errors {
            println!("  {} {}", "❌".red(), error);
        }
    }

    if !result.reasoning.is_empty() {
        println!("{}", "Reasoning:".bold());
        println!("  {}", result.reasoning.dimmed());
    }

    if !result.success_message.is_empty() {
        println!("{}", result.success_message);
    }
}
