use clap::{Args, Parser, Subcommand, ValueEnum};

/// About a hundred years either way.
pub const MAX_WEEK_OFFSET: i64 = 5200;

#[derive(Parser, Debug)]
#[command(name = "habita", version, author, about = "Track habits on a weekly schedule, with streaks and statistics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create your profile (runs automatically on first use)
    Setup {
        /// Replace the existing profile
        #[arg(long)]
        reset: bool,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Show or update your profile
    Profile {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        #[command(flatten)]
        fields: HabitArgs,
    },
    /// Edit an existing habit
    Edit {
        /// Habit id or name
        habit: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: HabitArgs,
    },
    /// Delete a habit and all of its records
    Delete {
        /// Habit id or name
        habit: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// List habits scheduled for a day (today by default)
    List {
        /// Day to show (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Show every habit regardless of schedule
        #[arg(long)]
        all: bool,
    },
    /// Record progress for a habit
    Mark {
        /// Habit id or name
        habit: String,
        /// Day to mark (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[command(flatten)]
        value: MarkArgs,
    },
    /// Show a habit's details, stats and last 30 days
    Show {
        /// Habit id or name
        habit: String,
    },
    /// Show statistics
    Stats {
        /// Time range
        #[arg(long, value_enum, default_value_t = TimeRange::Week)]
        range: TimeRange,
        /// Limit per-habit stats to one habit
        #[arg(long)]
        habit: Option<String>,
        /// Weeks relative to this week (week range only, e.g. -1)
        #[arg(
            long,
            default_value_t = 0,
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i64).range(-MAX_WEEK_OFFSET..=MAX_WEEK_OFFSET)
        )]
        offset: i64,
    },
    /// Export a weekly text summary (or everything as JSON) to stdout
    Export {
        #[arg(long)]
        json: bool,
    },
    /// Show the config file location, or write the defaults to it
    Config {
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub surname: Option<String>,
    #[arg(long)]
    pub age: Option<i32>,
    /// Male, Female or Other
    #[arg(long)]
    pub gender: Option<String>,
}

impl ProfileArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.surname.is_none() && self.age.is_none() && self.gender.is_none()
    }
}

#[derive(Args, Debug, Default)]
pub struct HabitArgs {
    /// quantitative (done/not done), qualitative (count to a target), scalable (rating)
    #[arg(long = "type")]
    pub habit_type: Option<String>,
    /// Days: daily, weekdays, weekends, or e.g. mon,wed,fri / 1,3,5 (1 = Monday)
    #[arg(long)]
    pub days: Option<String>,
    /// Daily target (qualitative)
    #[arg(long)]
    pub target: Option<i32>,
    /// Top of the rating scale (scalable)
    #[arg(long)]
    pub scale: Option<i32>,
    #[arg(long)]
    pub emoji: Option<String>,
}

#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct MarkArgs {
    /// Mark as done (quantitative)
    #[arg(long)]
    pub done: bool,
    /// Mark as not done (quantitative)
    #[arg(long)]
    pub failed: bool,
    /// Set the day's count (qualitative)
    #[arg(long)]
    pub quantity: Option<i32>,
    /// Add to the day's count (qualitative)
    #[arg(long)]
    pub add: Option<i32>,
    /// Set the day's rating (scalable)
    #[arg(long)]
    pub scale: Option<i32>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    Month,
    Overall,
}
