use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use chunggu_core::directory::MemberSortColumn;
use chunggu_core::engine::{CohortKey, SpecialTournament};
use chunggu_core::Gender;

#[derive(Debug, Parser)]
#[command(name = "chunggu", version, about = "Chunggu golf club statistics")]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "CHUNGGU_DATA_DIR",
        help = "Directory holding members.json and scores.json"
    )]
    pub data: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = "CHUNGGU_DATA_URL",
        help = "Base URL serving members.json and scores.json"
    )]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Club totals, distributions, top players and recent meetings
    Dashboard,
    /// One member's statistics, ranks and improvement trend
    Member(MemberArgs),
    /// Meeting list, or one meeting's leaderboard
    Meeting(MeetingArgs),
    /// Averages and participation per generation or gender
    Cohorts(CohortArgs),
    /// Averages per approximate year
    Years(YearsArgs),
    /// Filtered, sorted member directory
    Directory(DirectoryArgs),
    /// Best rounds at the 청구회장배 and 총동창회장배 tournaments
    Tournaments(TournamentArgs),
    /// Sign in as a member (id + last four phone digits) or administrator
    Login(LoginArgs),
    /// Sign out
    Logout,
    /// Administrator views; nothing is written back to the data source
    Admin(AdminArgs),
}

#[derive(Debug, Args)]
pub struct MemberArgs {
    #[arg(help = "Member id (defaults to the signed-in member)")]
    pub id: Option<i64>,
}

#[derive(Debug, Args)]
pub struct MeetingArgs {
    #[arg(help = "Meeting id; omit to list all meetings")]
    pub id: Option<i64>,
}

#[derive(Debug, Args)]
pub struct CohortArgs {
    #[arg(long, value_enum, default_value_t = CohortArg::Generation)]
    pub by: CohortArg,

    #[arg(long, default_value_t = 10, help = "Drop cohorts with fewer records (0 keeps all)")]
    pub min_records: usize,
}

#[derive(Debug, Args)]
pub struct YearsArgs {
    #[arg(long, help = "Meetings per year bucket (defaults to the config value)")]
    pub size: Option<i64>,
}

#[derive(Debug, Args)]
pub struct DirectoryArgs {
    #[arg(long, help = "Name contains (case-insensitive)")]
    pub search: Option<String>,

    #[arg(long)]
    pub generation: Option<u32>,

    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,

    #[arg(long, value_enum, default_value_t = SortArg::Name)]
    pub sort: SortArg,

    #[arg(long, default_value_t = false)]
    pub desc: bool,
}

#[derive(Debug, Args)]
pub struct TournamentArgs {
    #[arg(long, value_enum, help = "Only one tournament (default: both)")]
    pub cup: Option<CupArg>,

    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    pub username: String,

    #[arg(long, env = "CHUNGGU_PASSWORD")]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: Option<AdminCommand>,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Totals and the most recent members and meetings
    Overview,
    /// Preview the roster with an added member
    Add(AddMemberArgs),
    /// Preview the roster without a member
    Remove(RemoveMemberArgs),
}

#[derive(Debug, Args)]
pub struct AddMemberArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub generation: u32,

    #[arg(long, value_enum)]
    pub gender: GenderArg,

    #[arg(long, help = "Phone number, e.g. 010-1234-5678")]
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct RemoveMemberArgs {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CohortArg {
    Generation,
    Gender,
}

impl From<CohortArg> for CohortKey {
    fn from(arg: CohortArg) -> Self {
        match arg {
            CohortArg::Generation => CohortKey::Generation,
            CohortArg::Gender => CohortKey::Gender,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CupArg {
    /// 청구회장배
    Presidents,
    /// 총동창회장배
    Alumni,
}

impl From<CupArg> for SpecialTournament {
    fn from(arg: CupArg) -> Self {
        match arg {
            CupArg::Presidents => SpecialTournament::PresidentsCup,
            CupArg::Alumni => SpecialTournament::AlumniCup,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Generation,
    Attendance,
    Average,
}

impl From<SortArg> for MemberSortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => MemberSortColumn::Name,
            SortArg::Generation => MemberSortColumn::Generation,
            SortArg::Attendance => MemberSortColumn::Attendance,
            SortArg::Average => MemberSortColumn::Average,
        }
    }
}
