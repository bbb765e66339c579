use console::Style;
use docqa_core::evidence::EvidenceEntry;

pub fn print_header(title: &str) {
    println!("\n{}", Style::new().bold().cyan().apply_to(title));
    println!(
        "{}",
        Style::new().dim().apply_to("─".repeat(console::measure_text_width(title)))
    );
}

pub fn print_success(msg: &str) {
    println!("{} {}", Style::new().green().bold().apply_to("SUCCESS:"), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", Style::new().yellow().bold().apply_to("WARNING:"), msg);
}

/// Boxed block of wrapped text, as wide as the terminal allows
pub struct Panel<'a> {
    title: &'a str,
    border: Style,
    body: Style,
}

impl<'a> Panel<'a> {
    const MIN_WIDTH: usize = 40;
    const MAX_WIDTH: usize = 100;

    pub fn new(title: &'a str, border: Style) -> Self {
        Self {
            title,
            border,
            body: Style::new(),
        }
    }

    pub fn body_style(mut self, style: Style) -> Self {
        self.body = style;
        self
    }

    pub fn print(&self, content: &str) {
        let width = console::Term::stdout()
            .size_checked()
            .map(|(_, cols)| cols as usize)
            .unwrap_or(80)
            .clamp(Self::MIN_WIDTH, Self::MAX_WIDTH);
        for line in self.render(content, width) {
            println!("{}", line);
        }
    }

    /// Lines of the panel, each `width` columns wide unless the title overflows
    fn render(&self, content: &str, width: usize) -> Vec<String> {
        let inner = width.saturating_sub(4);
        let title_rule = width.saturating_sub(console::measure_text_width(self.title) + 5);

        let mut lines = vec![format!(
            "{} {} {}",
            self.border.apply_to("┌─"),
            Style::new().bold().apply_to(self.title),
            self.border.apply_to(format!("{}┐", "─".repeat(title_rule)))
        )];
        lines.extend(
            content
                .lines()
                .flat_map(|line| textwrap::wrap(line, inner))
                .map(|text| {
                    let fill = inner.saturating_sub(console::measure_text_width(&text));
                    format!(
                        "{} {}{} {}",
                        self.border.apply_to("│"),
                        self.body.apply_to(&text),
                        " ".repeat(fill),
                        self.border.apply_to("│")
                    )
                }),
        );
        lines.push(
            self.border
                .apply_to(format!("└{}┘", "─".repeat(width.saturating_sub(2))))
                .to_string(),
        );
        lines
    }
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "{}: {}",
        Style::new().dim().apply_to(key),
        Style::new().bold().apply_to(value)
    );
}

pub fn print_search_hit(rank: usize, score: f32, entry: &EvidenceEntry) {
    println!(
        "{} {}",
        Style::new().bold().blue().apply_to(format!(
            "#{} {} p.{} [{}]",
            rank, entry.source, entry.page, entry.chunk_index
        )),
        Style::new().dim().apply_to(format!("{:.3}", score))
    );
    println!("{}", Style::new().dim().apply_to(entry.preview.trim()));
    println!();
}

pub fn print_evidence(entries: &[EvidenceEntry]) {
    print_header("Evidence");
    for entry in entries {
        Panel::new(&entry.to_string(), Style::new().blue())
            .body_style(Style::new().dim())
            .print(&entry.preview);
    }
}
