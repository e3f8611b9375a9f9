//! Command-line front end for the task backend.
//!
//! Usage:
//!
//! ```text
//! taskboard login --email ada@example.com --password '...'
//! taskboard tasks list --status in_progress --mine
//! taskboard progress <task-id>
//! taskboard notifications watch --updates 3
//! taskboard export --output tasks.csv
//! ```
//!
//! The backend is chosen with `VITE_API_BASE_URL` (or `VITE_API_URL`), the
//! `TASKBOARD_*` variables, or `config.toml` in the platform config
//! directory. The session is kept in `session.json` between runs. Logs go to
//! stderr and follow `RUST_LOG` (default `info`).

use std::{
    io::{self, Write},
    sync::Arc,
};

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use eyre::{WrapErr, bail};
use mockable::DefaultClock;
use taskboard::{
    api::ApiClient,
    config::ClientConfig,
    notification::{
        adapters::http::HttpNotificationApi,
        services::{NotificationPoller, NotificationService},
    },
    report::{
        adapters::http::HttpReportApi, domain::ReportScope, export::TaskExport,
        services::ReportService,
    },
    session::{
        SessionHandle,
        adapters::{file::FileSessionStore, http::HttpAuthApi},
        domain::{Credentials, Registration},
        services::AuthService,
    },
    task::{
        adapters::http::HttpTaskApi,
        domain::{
            Approval, CreateTaskRequest, ParseTaskValueError, Priority, RemarkKind, Task, TaskId,
            TaskQuery, TaskStage, TaskStatus, UserId, display_name,
        },
        services::TaskService,
    },
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Task management client")]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and keep the session
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an employee account and sign in
    Register {
        /// Display name
        #[arg(long)]
        name: String,
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Work with tasks
    #[command(subcommand)]
    Tasks(TaskCommand),
    /// Show progress, approval, and overdue state of a task
    Progress {
        /// Task identifier
        id: String,
    },
    /// Work with notifications
    #[command(subcommand)]
    Notifications(NotificationCommand),
    /// Show admin or HOD statistics
    Report {
        /// View to fetch, e.g. admin/dashboard or hod/reports
        scope: ReportScope,
    },
    /// Export tasks to CSV
    Export {
        /// Destination file; defaults to a dated name in the current directory
        #[arg(long)]
        output: Option<Utf8PathBuf>,
        #[command(flatten)]
        filter: ListFilter,
    },
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// List tasks
    List(ListFilter),
    /// Show one task
    Show {
        /// Task identifier
        id: String,
    },
    /// Create a task
    Create {
        /// Title
        #[arg(long)]
        title: String,
        /// Description
        #[arg(long)]
        description: String,
        /// Assignee user id; repeat for a group task
        #[arg(long = "assignee", required = true)]
        assignees: Vec<String>,
        /// Priority
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        /// Deadline as RFC 3339
        #[arg(long)]
        deadline: Option<DateTime<Utc>>,
        /// Tag; repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Set the task status
    Status {
        /// Task identifier
        id: String,
        /// New status
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    /// Set the stage of the task or, with --user, of one assignee
    Stage {
        /// Task identifier
        id: String,
        /// New stage
        #[arg(value_parser = parse_stage)]
        stage: TaskStage,
        /// Assignee whose stage to set
        #[arg(long)]
        user: Option<String>,
    },
    /// Record an approval verdict for one assignee
    Approve {
        /// Task identifier
        id: String,
        /// Assignee user id
        #[arg(long)]
        user: String,
        /// Verdict
        #[arg(long, value_parser = parse_approval, default_value = "approved")]
        verdict: Approval,
    },
    /// Add a general remark
    Remark {
        /// Task identifier
        id: String,
        /// Remark text
        text: String,
    },
    /// Soft-delete a task
    Delete {
        /// Task identifier
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum NotificationCommand {
    /// List notifications
    List,
    /// Mark every notification read
    ReadAll,
    /// Print the unread count as it changes
    Watch {
        /// Stop after this many updates
        #[arg(long, default_value_t = 1)]
        updates: usize,
    },
}

#[derive(Debug, clap::Args)]
struct ListFilter {
    /// Only tasks with this status
    #[arg(long, value_parser = parse_status)]
    status: Option<TaskStatus>,
    /// Only tasks with this priority
    #[arg(long, value_parser = parse_priority)]
    priority: Option<Priority>,
    /// Only tasks in this stage
    #[arg(long, value_parser = parse_stage)]
    stage: Option<TaskStage>,
    /// Free-text search
    #[arg(long)]
    search: Option<String>,
    /// Only tasks assigned to the signed-in user
    #[arg(long)]
    mine: bool,
    /// Page number
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Page size
    #[arg(long, default_value_t = 20)]
    limit: u32,
}

impl ListFilter {
    fn query(&self, session: &SessionHandle) -> TaskQuery {
        let mut query = TaskQuery::new().page(self.page, self.limit);
        query.status = self.status;
        query.priority = self.priority;
        query.stage = self.stage;
        query.search.clone_from(&self.search);
        if self.mine {
            query.assigned_to = session.user().map(|user| user.id);
        }
        query
    }
}

fn parse_status(raw: &str) -> Result<TaskStatus, ParseTaskValueError> {
    TaskStatus::try_from(raw)
}

fn parse_stage(raw: &str) -> Result<TaskStage, ParseTaskValueError> {
    TaskStage::try_from(raw)
}

fn parse_priority(raw: &str) -> Result<Priority, ParseTaskValueError> {
    Priority::try_from(raw)
}

fn parse_approval(raw: &str) -> Result<Approval, ParseTaskValueError> {
    Approval::try_from(raw)
}

/// Services wired to the HTTP backend.
struct App {
    session: SessionHandle,
    auth: AuthService<HttpAuthApi, FileSessionStore>,
    tasks: TaskService<HttpTaskApi, DefaultClock>,
    notifications: NotificationService<HttpNotificationApi>,
    reports: ReportService<HttpReportApi>,
    clock: Arc<DefaultClock>,
    config: ClientConfig,
}

impl App {
    async fn connect() -> eyre::Result<Self> {
        let config = ClientConfig::load().wrap_err("failed to load configuration")?;
        let session = SessionHandle::new();
        let client = ApiClient::new(&config, session.clone())?;
        let store = FileSessionStore::open(&config.session_dir()?)?;
        let clock = Arc::new(DefaultClock);
        let auth = AuthService::new(
            Arc::new(HttpAuthApi::new(client.clone())),
            Arc::new(store),
            session.clone(),
        );
        if let Err(err) = auth.restore().await {
            warn!(error = %err, "continuing signed out, stored session could not be restored");
        }
        Ok(Self {
            tasks: TaskService::new(
                Arc::new(HttpTaskApi::new(client.clone())),
                Arc::clone(&clock),
            ),
            notifications: NotificationService::new(Arc::new(HttpNotificationApi::new(
                client.clone(),
            ))),
            reports: ReportService::new(Arc::new(HttpReportApi::new(client))),
            session,
            auth,
            clock,
            config,
        })
    }

    fn require_session(&self) -> eyre::Result<()> {
        if !self.auth.is_authenticated() {
            bail!("not signed in, run `taskboard login` first");
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::connect().await?;
    let mut out = io::stdout().lock();
    run(&app, cli.cmd, &mut out).await
}

async fn run(app: &App, command: Commands, out: &mut impl Write) -> eyre::Result<()> {
    match command {
        Commands::Login { email, password } => {
            let user = app.auth.login(&Credentials::new(email, password)?).await?;
            writeln!(out, "Signed in as {} ({})", user.name, user.role.as_str())?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let user = app
                .auth
                .register(&Registration::new(name, email, password)?)
                .await?;
            writeln!(out, "Registered and signed in as {}", user.name)?;
        }
        Commands::Logout => {
            app.auth.logout().await?;
            writeln!(out, "Signed out")?;
        }
        Commands::Whoami => match app.auth.current_user() {
            Some(user) => writeln!(
                out,
                "{} <{}> ({})",
                user.name,
                user.email,
                user.role.as_str()
            )?,
            None => writeln!(out, "Not signed in")?,
        },
        Commands::Tasks(task_command) => {
            app.require_session()?;
            run_task(app, task_command, out).await?;
        }
        Commands::Progress { id } => {
            app.require_session()?;
            let task = app.tasks.get(&TaskId::new(id)?).await?;
            write_progress(app, &task, out)?;
        }
        Commands::Notifications(notification_command) => {
            app.require_session()?;
            run_notifications(app, notification_command, out).await?;
        }
        Commands::Report { scope } => {
            app.require_session()?;
            let stats = app.reports.fetch(scope).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        }
        Commands::Export { output, filter } => {
            app.require_session()?;
            let page = app.tasks.list(&filter.query(&app.session)).await?;
            let export = TaskExport::new(&page.tasks, app.clock.as_ref());
            let path = output.unwrap_or_else(|| Utf8PathBuf::from(export.file_name()));
            export.write_path(&path)?;
            writeln!(out, "Exported {} tasks to {path}", page.tasks.len())?;
        }
    }
    Ok(())
}

async fn run_task(app: &App, command: TaskCommand, out: &mut impl Write) -> eyre::Result<()> {
    match command {
        TaskCommand::List(filter) => {
            let page = app.tasks.list(&filter.query(&app.session)).await?;
            for task in &page.tasks {
                let progress = app.tasks.progress(task);
                writeln!(
                    out,
                    "{}  {:<12} {:>3}%  {}{}",
                    task.id().as_str(),
                    task.status().label(),
                    progress.percent,
                    task.title(),
                    if progress.overdue { "  [overdue]" } else { "" }
                )?;
            }
            if let Some(pagination) = page.pagination {
                writeln!(
                    out,
                    "page {}/{} ({} tasks)",
                    pagination.page, pagination.pages, pagination.total
                )?;
            }
        }
        TaskCommand::Show { id } => {
            let task = app.tasks.get(&TaskId::new(id)?).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&task)?)?;
        }
        TaskCommand::Create {
            title,
            description,
            assignees,
            priority,
            deadline,
            tags,
        } => {
            let users = assignees
                .into_iter()
                .map(UserId::new)
                .collect::<Result<Vec<_>, _>>()?;
            let mut request = CreateTaskRequest::new(title, description)
                .with_assignees(users)
                .with_tags(tags);
            if let Some(level) = priority {
                request = request.with_priority(level);
            }
            if let Some(due) = deadline {
                request = request.with_deadline(due);
            }
            let task = app.tasks.create(&request).await?;
            writeln!(out, "Created {}", task.id())?;
        }
        TaskCommand::Status { id, status } => {
            let task = app.tasks.update_status(&TaskId::new(id)?, status).await?;
            writeln!(out, "{} is now {}", task.id(), task.status().label())?;
        }
        TaskCommand::Stage { id, stage, user } => {
            let task_id = TaskId::new(id)?;
            let task = match user {
                Some(assignee) => {
                    app.tasks
                        .update_individual_stage(&task_id, &UserId::new(assignee)?, stage)
                        .await?
                }
                None => app.tasks.update_stage(&task_id, stage).await?,
            };
            write_progress(app, &task, out)?;
        }
        TaskCommand::Approve { id, user, verdict } => {
            let task = app.tasks.get(&TaskId::new(id)?).await?;
            let updated = app
                .tasks
                .update_individual_approval(&task, &UserId::new(user)?, verdict)
                .await?;
            write_progress(app, &updated, out)?;
        }
        TaskCommand::Remark { id, text } => {
            let task = app
                .tasks
                .add_remark(&TaskId::new(id)?, RemarkKind::General, &text)
                .await?;
            writeln!(out, "{} remarks on {}", task.remarks().total(), task.id())?;
        }
        TaskCommand::Delete { id } => {
            let task_id = TaskId::new(id)?;
            app.tasks.delete(&task_id).await?;
            writeln!(out, "Deleted {task_id}")?;
        }
    }
    Ok(())
}

async fn run_notifications(
    app: &App,
    command: NotificationCommand,
    out: &mut impl Write,
) -> eyre::Result<()> {
    match command {
        NotificationCommand::List => {
            let feed = app.notifications.list().await?;
            for item in feed.items() {
                let marker = if item.is_read { ' ' } else { '*' };
                writeln!(
                    out,
                    "{marker} [{}] {}: {}",
                    item.kind.label(),
                    item.title,
                    item.message
                )?;
            }
            writeln!(out, "{} unread", feed.unread())?;
        }
        NotificationCommand::ReadAll => {
            let mut feed = app.notifications.list().await?;
            app.notifications.mark_all_read(&mut feed).await?;
            writeln!(out, "Marked {} notifications read", feed.items().len())?;
        }
        NotificationCommand::Watch { updates } => {
            let poller =
                NotificationPoller::spawn(app.notifications.clone(), app.config.poll_interval());
            let mut receiver = poller.subscribe();
            for _ in 0..updates {
                if receiver.changed().await.is_err() {
                    bail!("notification poller stopped");
                }
                let count = *receiver.borrow_and_update();
                writeln!(out, "{count} unread")?;
            }
            poller.stop().await;
        }
    }
    Ok(())
}

fn write_progress(app: &App, task: &Task, out: &mut impl Write) -> eyre::Result<()> {
    let progress = app.tasks.progress(task);
    writeln!(out, "{}", task.title())?;
    writeln!(out, "  progress: {}%", progress.percent)?;
    writeln!(out, "  approval: {}", progress.approval)?;
    writeln!(out, "  overdue:  {}", if progress.overdue { "yes" } else { "no" })?;
    for assignment in task.assigned_to() {
        writeln!(
            out,
            "  - {:<20} {:<9} {}",
            display_name(assignment.user.as_ref()),
            assignment.individual_stage().label(),
            assignment.approval.map_or("-", Approval::as_str)
        )?;
    }
    Ok(())
}
