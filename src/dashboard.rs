use cordex::{Dashboard, Filter, HistogramBin, JournalChoice, LoadMetrics, SampleRow};

const BAR_WIDTH: usize = 40;

/// What a piece of dashboard text is, which decides how it is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Title,
    Rule,
    Note,
    Figure,
    Matched,
    YearBar,
    JournalBar,
    HistogramBar,
    Keyword,
    Year,
}

impl Tone {
    /// SGR parameters for this tone.
    fn sgr(self) -> &'static str {
        match self {
            Tone::Title => "1;36",
            Tone::Rule => "90",
            Tone::Note => "2",
            Tone::Figure => "1",
            Tone::Matched | Tone::Keyword => "32",
            Tone::YearBar => "34",
            Tone::JournalBar => "35",
            Tone::HistogramBar | Tone::Year => "33",
        }
    }
}

/// Wraps text in SGR escapes, or passes it through when color is off.
struct Palette {
    color: bool,
}

impl Palette {
    fn paint(&self, text: impl AsRef<str>, tone: Tone) -> String {
        let text = text.as_ref();
        if self.color { format!("\x1b[{}m{text}\x1b[0m", tone.sgr()) } else { text.to_string() }
    }
}

/// What the dashboard was computed from.
pub struct Header<'a> {
    pub source: String,
    pub filter: &'a Filter,
}

pub fn print_dashboard(header: &Header<'_>, dash: &Dashboard, metrics: Option<LoadMetrics>, color: bool) {
    let palette = Palette { color };
    println!("\n{}", palette.paint("🔬 CORD-19 Data Explorer", Tone::Title));
    println!("{}", palette.paint(format!("   source: {}", header.source), Tone::Note));

    section("Dataset Overview", &palette);
    print_overview(header, dash, &palette);

    if let Some(years) = &dash.year_counts {
        section("Publications by Year", &palette);
        let rows: Vec<(String, usize)> = years.iter().map(|y| (y.year.to_string(), y.count)).collect();
        print_bars(&rows, Tone::YearBar, &palette);
    }

    if let Some(journals) = &dash.top_journals {
        section(&format!("Top {} Journals", journals.len()), &palette);
        let rows: Vec<(String, usize)> = journals.iter().map(|j| (truncate(&j.journal, 36), j.count)).collect();
        print_bars(&rows, Tone::JournalBar, &palette);
    }

    if let Some(words) = &dash.title_words {
        section("Most Frequent Title Words", &palette);
        if words.is_empty() {
            println!("  {}", palette.paint("No title words", Tone::Note));
        } else {
            let peak = words[0].count;
            let cells: Vec<String> = words
                .iter()
                .map(|w| {
                    let text = format!("{}({})", w.word, w.count);
                    // Emphasise the words a word cloud would draw largest.
                    if w.count * 2 >= peak { palette.paint(text, Tone::Keyword) } else { text }
                })
                .collect();
            for line in cells.chunks(6) {
                println!("  {}", line.join("  "));
            }
        }
    }

    if let Some(hist) = &dash.abstract_histogram {
        let (lo, hi) = dash.histogram_window;
        section(&format!("Abstract Word Count Distribution ({lo:.0}–{hi:.0} words)"), &palette);
        let shown = hist.window(lo, hi);
        let hidden = hist.total - shown.iter().map(|b| b.count).sum::<usize>();
        let rows: Vec<(String, usize)> = shown.iter().map(bin_label).collect();
        print_bars(&rows, Tone::HistogramBar, &palette);
        if hidden > 0 {
            println!("  {}", palette.paint(format!("+{hidden} abstracts outside the display range"), Tone::Note));
        }
    }

    if let Some(sample) = &dash.sample {
        section("Sample Data", &palette);
        print_sample(sample, &palette);
    }

    if let Some(metrics) = metrics {
        section("Timing", &palette);
        println!(
            "  Load: {}  │  Read: {}  │  Clean: {}",
            palette.paint(format!("{:?}", metrics.total), Tone::Figure),
            format!("{:?}", metrics.read),
            format!("{:?}", metrics.clean),
        );
    }
    println!();
}

fn section(title: &str, palette: &Palette) {
    println!("\n{}", palette.paint(format!("━━━ {title} ━━━"), Tone::Rule));
}

fn print_overview(header: &Header<'_>, dash: &Dashboard, palette: &Palette) {
    let overview = &dash.overview;
    let span = match overview.year_span {
        Some((min, max)) => format!("{min} - {max}"),
        None => "n/a".to_string(),
    };

    println!(
        "  Total papers: {}  │  Years covered: {}  │  Unique journals: {}",
        palette.paint(overview.total_papers.to_string(), Tone::Figure),
        palette.paint(span, Tone::Figure),
        palette.paint(overview.unique_journals.to_string(), Tone::Figure),
    );

    let journal = match &header.filter.journal {
        JournalChoice::All => "all journals".to_string(),
        JournalChoice::Only(name) => name.clone(),
    };
    println!(
        "  Filtered dataset: {} papers  {}",
        palette.paint(dash.filtered.to_string(), Tone::Matched),
        palette.paint(format!("(years {:?}, {journal})", header.filter.years), Tone::Note),
    );
}

fn print_bars(rows: &[(String, usize)], tone: Tone, palette: &Palette) {
    if rows.is_empty() {
        println!("  {}", palette.paint("No papers match the current filters", Tone::Note));
        return;
    }

    let peak = rows.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);

    for (label, count) in rows {
        let pad = label_width - label.chars().count();
        println!(
            "  {}{} {} {}",
            " ".repeat(pad),
            label,
            palette.paint(bar(*count, peak), tone),
            palette.paint(count.to_string(), Tone::Note),
        );
    }
}

/// A bar scaled against `peak`. Non-zero values always get at least one cell.
fn bar(value: usize, peak: usize) -> String {
    if peak == 0 || value == 0 {
        return "│".to_string();
    }
    let cells = ((value * BAR_WIDTH) as f64 / peak as f64).round().max(1.0) as usize;
    format!("│{}", "█".repeat(cells))
}

fn bin_label(bin: &HistogramBin) -> (String, usize) {
    (format!("{:>5.0}–{:<5.0}", bin.start, bin.end), bin.count)
}

fn print_sample(rows: &[SampleRow], palette: &Palette) {
    if rows.is_empty() {
        println!("  {}", palette.paint("No papers match the current filters", Tone::Note));
        return;
    }

    println!(
        "  {}",
        palette.paint(format!("{:<48}  {:<28}  {:<28}  {}", "title", "authors", "journal", "year"), Tone::Figure)
    );
    for row in rows {
        println!(
            "  {:<48}  {:<28}  {:<28}  {}",
            truncate(&row.title, 48),
            palette.paint(pad(&truncate(&row.authors, 28), 28), Tone::Note),
            truncate(&row.journal, 28),
            palette.paint(row.year.to_string(), Tone::Year),
        );
    }
}

/// Cut `s` to at most `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Left-align to `width` characters before color codes are added.
fn pad(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}
