use crate::analysis::champion_resolver::ChampionResolver;
use crate::analysis::champion_stats::AggregateStat;
use crate::analysis::matchups::{ChampionBreakdown, OpponentSummary, ThreatTiers};
use crate::analysis::player_stats::PlayerGame;
use crate::analysis::scrims::{FirstBloodTeam, MatchDetail, PerformanceRow, ScoreboardRow};
use crate::analysis::team_stats::{ObjectiveControl, TeamRecord};
use crate::api::endpoints;
use crate::roster::{Role, Roster};
use crate::store::models::{MatchRecord, PlayerSummaryRecord};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

const PLACEHOLDER: &str = "?";

/// Resolves champion names to Data Dragon art for one catalog version.
pub struct ChampionArt<'a> {
    resolver: &'a ChampionResolver<'a>,
    version: &'a str,
}

impl<'a> ChampionArt<'a> {
    pub fn new(resolver: &'a ChampionResolver<'a>, version: &'a str) -> Self {
        ChampionArt { resolver, version }
    }

    /// Canonical champion id, or a placeholder when unresolved.
    pub fn key(&self, champion: &str) -> String {
        self.resolver
            .resolve(champion)
            .map(str::to_string)
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    pub fn icon(&self, champion: &str) -> String {
        self.resolver
            .resolve(champion)
            .map(|id| endpoints::champion_icon_url(self.version, id))
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}

fn header(title: &str, width: usize) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(width).cyan());
}

fn result_cell(label: &str, win: bool) -> String {
    if win {
        label.green().to_string()
    } else {
        label.red().to_string()
    }
}

fn rate_cell(win_rate: f64) -> String {
    let text = format!("{:.1}%", win_rate);
    if win_rate >= 60.0 {
        text.green().to_string()
    } else if win_rate < 40.0 {
        text.red().to_string()
    } else {
        text
    }
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

#[derive(Tabled)]
struct ScrimRow {
    id: String,
    date: String,
    opponent: String,
    result: String,
    side: String,
    duration: String,
}

pub fn display_scrim_list(matches: &[&MatchRecord], total: usize) {
    header(&format!("🗂️  SCRIMS ({} of {})", matches.len(), total), 80);

    if matches.is_empty() {
        display_info("No scrims match these filters");
        return;
    }

    let wins = matches.iter().filter(|m| m.win).count();
    println!(
        "{} {} W / {} L\n",
        "📈 Record:".bold(),
        wins.to_string().green(),
        (matches.len() - wins).to_string().red()
    );

    let rows = matches
        .iter()
        .map(|m| ScrimRow {
            id: m.id.clone(),
            date: m.date.clone(),
            opponent: m.opponent_name().to_string(),
            result: result_cell(m.result_label(), m.win),
            side: m.side.label().to_string(),
            duration: m.duration().to_string(),
        })
        .collect();
    print_table::<ScrimRow>(rows);
    println!("\nUse {} to open a scrim\n", "scrims --id <ID>".bold());
}

pub fn display_filter_options(allied: &[String], enemy: &[String], opponents: &[String]) {
    header("🔎 FILTER OPTIONS", 60);
    println!("{} {}", "Opponents:".bold(), opponents.join(", "));
    println!("{} {}", "Allied champions:".bold(), allied.join(", "));
    println!("{} {}\n", "Enemy champions:".bold(), enemy.join(", "));
}

#[derive(Tabled)]
struct DraftRow {
    pick: String,
    team: String,
    champion: String,
    key: String,
}

#[derive(Tabled)]
struct BuildRow {
    player: String,
    champion: String,
    kda: String,
    items: String,
    trinket: String,
}

#[derive(Tabled)]
struct PerformanceTableRow {
    player: String,
    kda: String,
    #[tabled(rename = "Gold@15")]
    gold: String,
    #[tabled(rename = "CS@15")]
    cs: String,
    #[tabled(rename = "Gold Diff@15")]
    gold_diff: String,
    #[tabled(rename = "CS Diff@15")]
    cs_diff: String,
}

fn build_rows(rows: &[ScoreboardRow], art: &ChampionArt) -> Vec<BuildRow> {
    rows.iter()
        .map(|r| BuildRow {
            player: r.player.clone(),
            champion: format!("{}\n{}", r.champion, art.icon(&r.champion)),
            kda: r.kda.clone(),
            items: r.item_icons.join("\n"),
            trinket: r.trinket_icon.clone().unwrap_or_default(),
        })
        .collect()
}

fn performance_rows(rows: &[PerformanceRow]) -> Vec<PerformanceTableRow> {
    rows.iter()
        .map(|r| PerformanceTableRow {
            player: r.player.clone(),
            kda: r.kda.clone(),
            gold: format!("{:.0}", r.gold_15min),
            cs: format!("{:.0}", r.cs_15min),
            gold_diff: format!("{:+.0}", r.gold_diff_15min),
            cs_diff: format!("{:+.1}", r.cs_diff_15min),
        })
        .collect()
}

pub fn display_scrim_detail(detail: &MatchDetail, team_name: &str, art: &ChampionArt) {
    let m = detail.record;
    header(&format!("⚔️  {} vs {}", team_name, m.opponent_name()), 80);

    println!(
        "{} {}   {} {}   {} {}   {} {}",
        "Result:".bold(),
        result_cell(m.result_label(), m.win),
        "Date:".bold(),
        m.date,
        "Duration:".bold(),
        m.duration(),
        "Side:".bold(),
        m.side.label()
    );
    match detail.first_blood {
        Some(FirstBloodTeam::Us) => println!("{} {}", "First Blood:".bold(), "us".green()),
        Some(FirstBloodTeam::Opponent) => {
            println!("{} {}", "First Blood:".bold(), "opponent".red())
        }
        None => {}
    }
    if let Some((home, enemy)) = detail.objectives {
        println!(
            "{} {} dragons, {} barons  |  {} {} dragons, {} barons",
            "Us:".bold(),
            home.dragons,
            home.barons,
            "Them:".bold(),
            enemy.dragons,
            enemy.barons
        );
    }

    if !detail.draft.is_empty() {
        println!("\n{}", "Draft".bold().yellow());
        let rows = detail
            .draft
            .iter()
            .map(|p| DraftRow {
                pick: p.label.clone(),
                team: if p.home {
                    p.team.blue().to_string()
                } else {
                    p.team.red().to_string()
                },
                champion: p.champion.clone(),
                key: art.key(&p.champion),
            })
            .collect();
        print_table::<DraftRow>(rows);
    }

    if !detail.scoreboard.home.is_empty() || !detail.scoreboard.opponent.is_empty() {
        println!("\n{}", format!("{} Final Items", team_name).bold().yellow());
        print_table(build_rows(&detail.scoreboard.home, art));
        println!("\n{}", "Opponent Final Items".bold().yellow());
        print_table(build_rows(&detail.scoreboard.opponent, art));
    }

    if !detail.performance.roster.is_empty() {
        println!("\n{}", format!("{} Players", team_name).bold().yellow());
        print_table(performance_rows(&detail.performance.roster));
    }
    if !detail.performance.others.is_empty() {
        println!("\n{}", "Opponent Players".bold().yellow());
        print_table(performance_rows(&detail.performance.others));
    }
    println!();
}

#[derive(Tabled)]
struct RecordRow {
    split: String,
    games: usize,
    wins: usize,
    losses: usize,
    win_rate: String,
}

impl From<&AggregateStat> for RecordRow {
    fn from(stat: &AggregateStat) -> Self {
        RecordRow {
            split: stat.name.clone(),
            games: stat.games,
            wins: stat.wins,
            losses: stat.losses,
            win_rate: rate_cell(stat.win_rate),
        }
    }
}

pub fn display_team_stats(record: &TeamRecord, objectives: &ObjectiveControl) {
    header("📊 TEAM STATISTICS", 60);

    print_table::<RecordRow>(
        [&record.overall, &record.blue, &record.red]
            .into_iter()
            .map(RecordRow::from)
            .collect(),
    );

    println!("\n{}", "Objective Control".bold().yellow());
    print_table::<RecordRow>(objectives.firsts.iter().map(RecordRow::from).collect());
    println!(
        "\n{} {:.1} dragons, {:.1} barons per game\n",
        "Average:".bold(),
        objectives.avg_dragons,
        objectives.avg_barons
    );
}

#[derive(Tabled)]
struct PlayerRow {
    name: String,
    games: u32,
    kda: String,
    #[tabled(rename = "Gold@15")]
    gold: String,
    #[tabled(rename = "CS@15")]
    cs: String,
    wards: String,
    scrim_record: String,
}

pub fn display_player_list(players: &[&PlayerSummaryRecord], records: &[AggregateStat]) {
    header("👥 PLAYERS", 70);

    if players.is_empty() {
        display_info("No player summaries found");
        return;
    }

    let rows = players
        .iter()
        .map(|p| {
            let scrim_record = records
                .iter()
                .find(|r| r.name.eq_ignore_ascii_case(&p.name))
                .map(|r| format!("{}W {}L ({:.1}%)", r.wins, r.losses, r.win_rate))
                .unwrap_or_else(|| "-".to_string());
            PlayerRow {
                name: p.name.clone(),
                games: p.games_played,
                kda: p.avg_player_data.kda.clone(),
                gold: format!("{:.0}", p.avg_player_data.gold_15min),
                cs: format!("{:.1}", p.avg_player_data.cs_15min),
                wards: format!("{:.1}", p.avg_control_wards),
                scrim_record,
            }
        })
        .collect();
    print_table::<PlayerRow>(rows);
    println!("\nUse {} for details\n", "players --name <NAME>".bold());
}

#[derive(Tabled)]
struct MetricRow {
    metric: String,
    value: String,
}

fn metric(name: &str, value: String) -> MetricRow {
    MetricRow {
        metric: name.to_string(),
        value,
    }
}

#[derive(Tabled)]
struct HistoryRow {
    scrim: String,
    date: String,
    opponent: String,
    result: String,
    position: String,
    kda: String,
    ratio: String,
    #[tabled(rename = "Gold@15")]
    gold: String,
    #[tabled(rename = "CS@15")]
    cs: String,
    #[tabled(rename = "Gold Diff@15")]
    gold_diff: String,
    #[tabled(rename = "CS Diff@15")]
    cs_diff: String,
}

pub fn display_player_detail(player: &PlayerSummaryRecord, history: &[PlayerGame]) {
    header(&format!("🎮 {}", player.name), 70);

    let avg = &player.avg_player_data;
    let mut rows = vec![
        metric("Games played", player.games_played.to_string()),
        metric("KDA", avg.kda.clone()),
        metric(
            "K / D / A",
            format!("{:.1} / {:.1} / {:.1}", avg.kda_kills, avg.kda_deaths, avg.kda_assists),
        ),
        metric("KDA ratio", format!("{:.2}", avg.kda_ratio)),
        metric("Gold@15", format!("{:.0}", avg.gold_15min)),
        metric("CS@15", format!("{:.1}", avg.cs_15min)),
        metric("Gold Diff@15", format!("{:+.0}", avg.gold_diff_15min)),
        metric("CS Diff@15", format!("{:+.1}", avg.cs_diff_15min)),
        metric("Control wards", format!("{:.1}", player.avg_control_wards)),
    ];

    if let Some(c) = &player.avg_challenges {
        rows.extend([
            metric("Vision score", format!("{:.1}", c.vision_score)),
            metric("Damage / min", format!("{:.0}", c.damage_per_minute)),
            metric("Buffs stolen", format!("{:.2}", c.buffs_stolen)),
            metric("Skillshots hit", format!("{:.1}", c.skill_shots_hit)),
            metric("Skillshots dodged", format!("{:.1}", c.skill_shots_dodged)),
            metric("Perfect games", format!("{:.2}", c.perfect_game)),
            metric("Turret plates", format!("{:.1}", c.turret_plates_taken)),
            metric(
                "Danced with Herald",
                if c.dance_with_rift_herald { "yes" } else { "no" }.to_string(),
            ),
        ]);
    }
    print_table(rows);

    println!("\n{}", "Game History".bold().yellow());
    if history.is_empty() {
        display_info("No scrims recorded for this player");
        return;
    }

    let rows = history
        .iter()
        .map(|g| HistoryRow {
            scrim: g.match_id.clone(),
            date: g.date.clone(),
            opponent: g.opponent.clone(),
            result: result_cell(g.result, g.win),
            position: g.position.clone(),
            kda: g.kda_text.clone(),
            ratio: format!("{:.2}", g.kda.ratio()),
            gold: format!("{:.0}", g.gold_15min),
            cs: format!("{:.0}", g.cs_15min),
            gold_diff: format!("{:+.0}", g.gold_diff_15min),
            cs_diff: format!("{:+.1}", g.cs_diff_15min),
        })
        .collect();
    print_table::<HistoryRow>(rows);
    println!();
}

#[derive(Tabled)]
struct ChampionRow {
    champion: String,
    key: String,
    games: usize,
    wins: usize,
    losses: usize,
    win_rate: String,
}

fn champion_rows(stats: &[AggregateStat], art: &ChampionArt) -> Vec<ChampionRow> {
    stats
        .iter()
        .map(|s| ChampionRow {
            champion: s.name.clone(),
            key: art.key(&s.name),
            games: s.games,
            wins: s.wins,
            losses: s.losses,
            win_rate: rate_cell(s.win_rate),
        })
        .collect()
}

pub fn display_champion_breakdown(breakdown: &ChampionBreakdown, roster: &Roster, art: &ChampionArt) {
    header("🏆 CHAMPION POOLS BY ROLE", 70);

    for role in Role::ALL {
        let player = roster.player_for(role).unwrap_or("-");
        println!("{}", format!("{} ({})", role, player).bold().yellow());

        let stats = breakdown.for_role(role);
        if stats.is_empty() {
            println!("  {}\n", "No games recorded".dimmed());
            continue;
        }
        print_table(champion_rows(stats, art));
        println!();
    }
}

fn threat_block(title: ColoredString, stats: &[AggregateStat], art: &ChampionArt) {
    println!("{}", title);
    if stats.is_empty() {
        println!("  {}\n", "None".dimmed());
        return;
    }
    print_table(champion_rows(stats, art));
    println!();
}

pub fn display_threats(
    tiers: &ThreatTiers,
    summary: &OpponentSummary,
    min_games: usize,
    art: &ChampionArt,
) {
    header("🎯 OPPONENT THREATS", 70);

    println!(
        "{} {}   {} {}",
        "Unique champions faced:".bold(),
        summary.unique_champions,
        "Strong against us (>60%):".bold(),
        summary.strong_against_us.to_string().red()
    );
    if let Some(top) = &summary.most_played {
        println!(
            "{} {} ({} games, {:.1}%)",
            "Most played against us:".bold(),
            top.name,
            top.games,
            top.win_rate
        );
    }
    println!("{}\n", format!("Tiers include champions with {}+ games", min_games).dimmed());

    threat_block("🔴 High threat (70%+)".bold().red(), &tiers.high, art);
    threat_block("🟠 Medium threat (50-70%)".bold().yellow(), &tiers.medium, art);
    threat_block("🟢 Low threat (<50%)".bold().green(), &tiers.low, art);
}

pub fn display_opponent_table(opponents: &[AggregateStat], art: &ChampionArt) {
    println!("{}", "All opponent champions".bold().yellow());
    if opponents.is_empty() {
        display_info("No opponent picks recorded");
        return;
    }
    print_table(champion_rows(opponents, art));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::ChampionCatalogEntry;

    #[test]
    fn unresolved_champions_get_placeholder() {
        let catalog = vec![ChampionCatalogEntry::new("MonkeyKing", "Wukong")];
        let resolver = ChampionResolver::new(&catalog);
        let art = ChampionArt::new(&resolver, "14.24.1");

        assert_eq!(art.key("Wukong"), "MonkeyKing");
        assert_eq!(
            art.icon("Wukong"),
            "https://ddragon.leagueoflegends.com/cdn/14.24.1/img/champion/MonkeyKing.png"
        );
        assert_eq!(art.key("Zeri"), PLACEHOLDER);
        assert_eq!(art.icon(""), PLACEHOLDER);
    }
}
