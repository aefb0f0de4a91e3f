use std::time::Duration;

use chrono::Timelike;
use clap::{Parser, Subcommand};
use join_api::v1::{
    Contact, ContactDraft, Priority, SignUp, TaskDraft, TaskEdit, TaskId, TaskStatus,
};
use join_client::{
    greeting, view::contact_groups, Board, Column, ContactRepository, Session, StoreClient,
    TaskCard, UserRepository, DEFAULT_STORE_URL,
};
use tokio::{signal, time};
use tracing_subscriber::EnvFilter;

/// Command-line front end of the Join board.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Base URL of the document store.
    #[arg(long, env = "JOIN_STORE_URL", default_value = DEFAULT_STORE_URL)]
    store: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the board, column by column.
    Board {
        /// Only show cards whose title or details contain this.
        #[arg(long)]
        search: Option<String>,
    },
    /// Print the greeting and task counts.
    Summary {
        #[arg(long, requires = "password")]
        email: Option<String>,
        #[arg(long, requires = "email")]
        password: Option<String>,
    },
    /// Reprint the board whenever the store changes.
    Watch {
        /// Seconds between polls.
        #[arg(long, default_value_t = 1)]
        interval: u64,
    },
    AddTask {
        title: String,
        /// `YYYY-MM-DD`
        #[arg(long)]
        due: String,
        /// `technical-task`, `user-story` or a free label.
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long = "assign")]
        assigned_to: Vec<String>,
        #[arg(long = "subtask")]
        sub_tasks: Vec<String>,
    },
    /// Drag a task into another column.
    Move { id: TaskId, status: TaskStatus },
    ToggleSubtask { id: TaskId, index: usize },
    EditTask {
        id: TaskId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// `YYYY-MM-DD`, empty to clear.
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    DeleteTask { id: TaskId },
    /// List contacts grouped by initial.
    Contacts,
    AddContact { name: String, mail: String, phone: String },
    EditContact {
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        mail: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    DeleteContact { index: usize },
    SignUp {
        /// First and last name.
        name: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        accept_policy: bool,
    },
    LogIn { email: String, password: String },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let store = StoreClient::new(&args.store)?;

    match args.command {
        Command::Board { search } => {
            let mut board = Board::new(store);
            board.load().await;
            print_columns(&board.search(search.as_deref().unwrap_or_default()));
        }
        Command::Summary { email, password } => {
            let session = match (email, password) {
                (Some(email), Some(password)) => {
                    let mut users = UserRepository::new(store.clone());
                    match users.authenticate(&email, &password).await {
                        Some(session) => session,
                        None => eyre::bail!("wrong email or password"),
                    }
                }
                _ => Session::guest(),
            };

            let mut board = Board::new(store);
            board.load().await;
            let summary = board.summary();

            let hour = chrono::Local::now().hour();
            println!("{}, {}", greeting(hour), session.greeting_name());
            println!();
            println!("To do           {}", summary.to_do);
            println!("Done            {}", summary.done);
            println!("Urgent          {}", summary.urgent);
            println!("Tasks in board  {}", summary.total);
            println!("In progress     {}", summary.in_progress);
            println!("Await feedback  {}", summary.await_feedback);
        }
        Command::Watch { interval } => {
            tokio::select! {
                result = watch(store, Duration::from_secs(interval.max(1))) => result?,
                _ = signal::ctrl_c() => {}
            }
        }
        Command::AddTask {
            title,
            due,
            category,
            description,
            priority,
            assigned_to,
            sub_tasks,
        } => {
            let mut board = Board::new(store);
            let draft = TaskDraft {
                title,
                description,
                due_date: due,
                category,
                priority,
                assigned_to,
                sub_tasks,
            };

            let id = board.tasks_mut().create_task(draft).await?;
            println!("created task {id}");
        }
        Command::Move { id, status } => {
            let mut board = Board::new(store);
            board.load().await;
            board.start_dragging(id.clone());

            match board.move_to(status).await? {
                true => println!("moved task {id} to {}", status.label()),
                false => eyre::bail!("no task {id}"),
            }
        }
        Command::ToggleSubtask { id, index } => {
            let mut board = Board::new(store);
            board.load().await;

            match board.tasks_mut().toggle_subtask(&id, index).await? {
                Some(progress) => println!("{} ({}%)", progress.label(), progress.percent),
                None => eyre::bail!("no subtask {index} on task {id}"),
            }
        }
        Command::EditTask {
            id,
            title,
            description,
            due,
            priority,
        } => {
            let mut board = Board::new(store);
            board.load().await;

            let Some(task) = board.tasks().get(&id) else {
                eyre::bail!("no task {id}");
            };

            let mut edit = TaskEdit::for_task(task);
            edit.title = title.unwrap_or(edit.title);
            edit.description = description.unwrap_or(edit.description);
            edit.due_date = due.unwrap_or(edit.due_date);
            edit.priority = priority.or(edit.priority);

            board.tasks_mut().save_task_edits(&id, edit).await?;

            if let Some(card) = board.card(&id) {
                print_card(&card);
            }
        }
        Command::DeleteTask { id } => {
            let mut board = Board::new(store);
            board.load().await;

            match board.tasks_mut().reindex_and_delete(&id).await? {
                true => println!("deleted task {id}"),
                false => eyre::bail!("no task {id}"),
            }
        }
        Command::Contacts => {
            let mut contacts = ContactRepository::new(store);
            print_contacts(contacts.list_contacts().await);
        }
        Command::AddContact { name, mail, phone } => {
            let mut contacts = ContactRepository::new(store);
            contacts.list_contacts().await;

            let id = (contacts.create_contact(ContactDraft { name, mail, phone })).await?;

            if let Some(index) = contacts.position(id) {
                println!("created contact {index}");
            }
        }
        Command::EditContact {
            index,
            name,
            mail,
            phone,
        } => {
            let mut contacts = ContactRepository::new(store);
            contacts.list_contacts().await;

            let Some(contact) = contacts.get(index) else {
                eyre::bail!("no contact {index}");
            };

            let mut draft = ContactDraft::for_contact(contact);
            draft.name = name.unwrap_or(draft.name);
            draft.mail = mail.unwrap_or(draft.mail);
            draft.phone = phone.unwrap_or(draft.phone);

            if let Some(index) = contacts.edit_contact(index, draft).await? {
                println!("contact is now {index}");
            }
        }
        Command::DeleteContact { index } => {
            let mut contacts = ContactRepository::new(store);
            contacts.list_contacts().await;

            match contacts.delete_contact(index).await? {
                true => println!("deleted contact {index}"),
                false => eyre::bail!("no contact {index}"),
            }
        }
        Command::SignUp {
            name,
            email,
            password,
            confirm_password,
            accept_policy,
        } => {
            let mut users = UserRepository::new(store);
            let form = SignUp {
                name,
                email,
                password,
                confirm_password,
                accept_policy,
            };

            let user = users.sign_up(form).await?;
            println!("signed up {} ({})", user.full_name(), user.initials);
        }
        Command::LogIn { email, password } => {
            let mut users = UserRepository::new(store);

            let Some(session) = users.authenticate(&email, &password).await else {
                eyre::bail!("wrong email or password");
            };

            println!("{}", serde_json::to_string_pretty(&session)?);
        }
    }

    Ok(())
}

async fn watch(store: StoreClient, interval: Duration) -> eyre::Result<()> {
    let mut board = Board::new(store.clone());
    let mut generation = None;

    loop {
        let new_generation = store.generation().await?;

        if generation != Some(new_generation) {
            generation = Some(new_generation);
            board.load().await;

            tracing::info!(generation = new_generation, "board changed");
            print_columns(&board.columns());
        }

        time::sleep(interval).await;
    }
}

fn print_columns(columns: &[Column]) {
    for column in columns {
        println!("{} ({})", column.status.label(), column.cards.len());

        if column.is_empty() {
            println!("  {}", Column::PLACEHOLDER);
        }

        for card in &column.cards {
            print_card(card);
        }

        println!();
    }
}

fn print_card(card: &TaskCard) {
    println!("  #{} {} [{}] {}", card.id, card.title, card.category, card.priority);

    if !card.details.is_empty() {
        println!("      {}", card.details);
    }

    if let Some(due_date) = &card.due_date {
        println!("      due {due_date}");
    }

    if !card.progress.is_empty() {
        println!("      {} ({}%)", card.progress.label(), card.progress.percent);
    }

    if !card.assignees.is_empty() {
        let initials: Vec<&str> = (card.assignees.iter())
            .map(|avatar| avatar.initials.as_str())
            .collect();
        println!("      {}", initials.join(" "));
    }
}

fn print_contacts(contacts: &[Contact]) {
    for group in contact_groups(contacts) {
        println!("{}", group.letter);

        for entry in group.entries {
            println!("  {:>3}  {:<3} {} <{}>", entry.index, entry.initials, entry.name, entry.mail);
        }
    }
}
