use include_dir::{include_dir, Dir, File};
use lazy_static::*;
use serde::Serialize;
use tera::Tera;

use crate::database::RankingEntry;

/// Must be a file name ending in `.j2`, located in `src/res/templates/`.
const SCREEN_TEMPLATE: &str = "screen.j2";

/// Everything displayed on one screen refresh.
#[derive(Serialize, Debug)]
pub struct View<'a> {
    pub title: &'a str,

    /// The username times are currently submitted under.
    pub username: &'a str,

    /// The configured leaderboard size.
    pub top_n: usize,

    /// The best entries, sorted from best to worse.
    pub rankings: Vec<RankingRow<'a>>,

    /// The total number of submissions, if it could be counted.
    pub nb_entries: Option<i64>,

    /// The stopwatch, formatted as `SS.mmm`.
    pub timer: String,

    pub running: bool,

    /// `True` if the accept and decline actions are available.
    pub can_submit: bool,

    /// Feedback for the previous action.
    pub message: Option<&'a str>,

    /// The rank of the most recently accepted time.
    pub last_user_rank: Option<usize>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct RankingRow<'a> {
    /// 1-based leaderboard position.
    pub pos: usize,
    pub username: &'a str,
    pub time: &'a str,
}

impl<'a> RankingRow<'a> {
    /// Number the given entries, which are expected to be sorted.
    pub fn from_entries(entries: &'a [RankingEntry]) -> Vec<RankingRow<'a>> {
        entries
            .iter()
            .enumerate()
            .map(|(idx, e)| RankingRow {
                pos: idx + 1,
                username: &e.username,
                time: &e.time,
            })
            .collect()
    }
}

impl View<'_> {
    /// Render the screen template with this context, extended by
    /// - `underline`: a line as wide as the title
    pub fn render(&self) -> String {
        log::debug!("render view context: {:?}", &self);

        let mut tera_context =
            tera::Context::from_serialize(self).expect("failed to create view context!");
        tera_context.insert("underline", &"=".repeat(self.title.chars().count()));

        TEMPLATES
            .render(SCREEN_TEMPLATE, &tera_context)
            .expect("failed to render view!")
    }
}

lazy_static! {
    static ref TEMPLATES: Tera = collect_templates().expect("failed to compile templates");
}

fn collect_templates() -> tera::Result<Tera> {
    // Include all templates at compile-time:
    static TEMPLATE_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/res/templates");

    let mut tera = Tera::default();

    for file in TEMPLATE_DIR.files() {
        add_from_file(&mut tera, file)?;
    }

    Ok(tera)
}

fn add_from_file(tera: &mut Tera, file: &File<'_>) -> tera::Result<()> {
    let file_name = file
        .path()
        .to_str()
        .ok_or_else(|| tera::Error::msg("template path is not valid UTF-8"))?;
    let contents = file
        .contents_utf8()
        .ok_or_else(|| tera::Error::msg(format!("template {} is not valid UTF-8", file_name)))?;
    tera.add_raw_template(file_name, contents)
}
