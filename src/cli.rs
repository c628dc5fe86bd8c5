use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dreamboard_lib::clock::DayBoundary;
use dreamboard_lib::models::{Dream, EntityId, Frequency, Goal, Habit, NewDream, NewGoal, NewHabit};
use dreamboard_lib::validation::parse_deadline;
use dreamboard_lib::{open_dashboard, AppError, Config, Dashboard, InitError};
use thiserror::Error;

#[derive(Parser, Debug, Clone)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version, about = env!("CARGO_PKG_DESCRIPTION"), long_about = None)]
pub struct Cli {
    /// Directory holding dreamboard.db
    #[arg(long, global = true, env = "DREAMBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Use UTC calendar days instead of the local time zone
    #[arg(long, global = true)]
    pub utc: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage dreams
    #[command(subcommand)]
    Dream(DreamCommand),
    /// Manage goals
    #[command(subcommand)]
    Goal(GoalCommand),
    /// Manage habits
    #[command(subcommand)]
    Habit(HabitCommand),
    /// Show a random motivational quote (static list, not AI generated)
    Inspire,
    /// Show totals across all collections
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DreamFields {
    pub title: String,
    #[arg(long, short, default_value = "")]
    pub description: String,
    /// Image URL
    #[arg(long, default_value = "")]
    pub image: String,
}

impl From<DreamFields> for NewDream {
    fn from(fields: DreamFields) -> Self {
        Self {
            title: fields.title,
            description: fields.description,
            image: fields.image,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum DreamCommand {
    Add(DreamFields),
    List,
    /// Replace a dream's title, description and image
    Edit {
        id: EntityId,
        #[command(flatten)]
        fields: DreamFields,
    },
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug, Clone)]
pub enum GoalCommand {
    Add {
        title: String,
        #[arg(long, short, default_value = "")]
        description: String,
        /// Target date, YYYY-MM-DD
        #[arg(long, default_value = "")]
        deadline: String,
    },
    List,
    /// Set completion percentage
    Progress {
        id: EntityId,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug, Clone)]
pub enum HabitCommand {
    Add {
        title: String,
        #[arg(long, short, default_value = "")]
        description: String,
        /// daily, weekly or monthly
        #[arg(long, short, default_value = "daily")]
        frequency: Frequency,
    },
    List,
    /// Mark today complete, or undo today's completion
    Toggle { id: EntityId },
    Delete { id: EntityId },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Output(#[from] serde_json::Error),

    #[error("changes could not be saved to the data store")]
    NotSaved,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            data_dir: self.data_dir.clone(),
            day_boundary: if self.utc { DayBoundary::Utc } else { DayBoundary::Local },
        }
    }
}

#[allow(clippy::print_stdout, reason = "command output goes to stdout")]
pub fn run(cli: Cli) -> Result<(), CliError> {
    let mut board = open_dashboard(&cli.config())?;

    match cli.command {
        Command::Dream(cmd) => run_dream(&mut board, cmd)?,
        Command::Goal(cmd) => run_goal(&mut board, cmd)?,
        Command::Habit(cmd) => run_habit(&mut board, cmd)?,
        Command::Inspire => println!("{}", board.inspire()),
        Command::Summary { json } => {
            let summary = board.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("dreams  {}", summary.dream_count);
                println!(
                    "goals   {} ({} complete)",
                    summary.goal_count, summary.completed_goals
                );
                if let Some(avg) = summary.average_progress {
                    println!("average progress {avg}%");
                }
                println!(
                    "habits  {} ({} done today)",
                    summary.habit_count, summary.habits_done_today
                );
                println!("best streak {}", summary.best_streak);
            }
        }
    }

    if board.is_in_sync() {
        Ok(())
    } else {
        Err(CliError::NotSaved)
    }
}

#[allow(clippy::print_stdout, reason = "command output goes to stdout")]
fn run_dream(board: &mut Dashboard, cmd: DreamCommand) -> Result<(), CliError> {
    match cmd {
        DreamCommand::Add(fields) => {
            let dream = board.add_dream(&fields.into())?;
            println!("{}", format_dream(&dream));
        }
        DreamCommand::List => {
            if board.dreams().is_empty() {
                println!("No dreams yet. Start by adding your first dream!");
            }
            for dream in board.dreams() {
                println!("{}", format_dream(dream));
            }
        }
        DreamCommand::Edit { id, fields } => {
            let dream = board.replace_dream(id, &fields.into())?;
            println!("{}", format_dream(&dream));
        }
        DreamCommand::Delete { id } => report_delete("dream", id, board.delete_dream(id)),
    }
    Ok(())
}

#[allow(clippy::print_stdout, reason = "command output goes to stdout")]
fn run_goal(board: &mut Dashboard, cmd: GoalCommand) -> Result<(), CliError> {
    match cmd {
        GoalCommand::Add { title, description, deadline } => {
            let draft = NewGoal {
                title,
                description,
                deadline: parse_deadline(&deadline)?,
            };
            let goal = board.add_goal(&draft)?;
            println!("{}", format_goal(&goal));
        }
        GoalCommand::List => {
            if board.goals().is_empty() {
                println!("No goals yet. Set your first goal!");
            }
            for goal in board.goals() {
                println!("{}", format_goal(goal));
            }
        }
        GoalCommand::Progress { id, percent } => {
            let goal = board.set_goal_progress(id, percent)?;
            println!("{}", format_goal(&goal));
        }
        GoalCommand::Delete { id } => report_delete("goal", id, board.delete_goal(id)),
    }
    Ok(())
}

#[allow(clippy::print_stdout, reason = "command output goes to stdout")]
fn run_habit(board: &mut Dashboard, cmd: HabitCommand) -> Result<(), CliError> {
    match cmd {
        HabitCommand::Add { title, description, frequency } => {
            let habit = board.add_habit(&NewHabit {
                title,
                description,
                frequency,
            })?;
            println!("{}", format_habit(&habit, false));
        }
        HabitCommand::List => {
            if board.habits().is_empty() {
                println!("No habits yet. Create your first habit!");
            }
            for habit in board.habits() {
                println!("{}", format_habit(habit, board.is_habit_done_today(habit.id)));
            }
        }
        HabitCommand::Toggle { id } => {
            let habit = board.toggle_habit(id)?;
            println!("{}", format_habit(&habit, board.is_habit_done_today(id)));
        }
        HabitCommand::Delete { id } => report_delete("habit", id, board.delete_habit(id)),
    }
    Ok(())
}

#[allow(clippy::print_stdout, reason = "command output goes to stdout")]
fn report_delete(entity: &str, id: EntityId, deleted: bool) {
    if deleted {
        println!("Deleted {entity} {id}");
    } else {
        println!("No {entity} with id {id}");
    }
}

fn format_dream(dream: &Dream) -> String {
    let mut line = format!("{}  {}", dream.id, dream.title);
    if !dream.description.is_empty() {
        line.push_str(&format!("  {}", dream.description));
    }
    if let Some(image) = &dream.image {
        line.push_str(&format!("  <{image}>"));
    }
    line
}

fn format_goal(goal: &Goal) -> String {
    let mut line = format!("{}  {:>3}%  {}", goal.id, goal.progress, goal.title);
    if let Some(deadline) = goal.deadline {
        line.push_str(&format!("  (target {deadline})"));
    }
    line
}

fn format_habit(habit: &Habit, done_today: bool) -> String {
    format!(
        "{}  [{}]  {}  {}  {} day streak",
        habit.id,
        if done_today { "x" } else { " " },
        habit.title,
        habit.frequency,
        habit.streak
    )
}
