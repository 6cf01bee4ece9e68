use console::{measure_text_width, style};

/// What is about to be committed and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<'a> {
    pub template: &'a str,
    pub ticket: &'a str,
    pub base: &'a str,
    /// Number of `SET @html_content` lines replaced in the template.
    pub replaced: usize,
}

/// Prints the change summary inside a blue box before the publish prompts.
///
/// # Parameters
///
/// * `summary` – Template name, branches and replacement count to show.
///
/// # Output
///
/// Prints directly to standard output. Intended for interactive display, not
/// for logging.
///
/// The box is sized to the widest **visible** line, using
/// [`console::measure_text_width`] so ANSI color codes in the content do not
/// throw off the padding. Borders are styled separately from the lines.
///
/// # Examples
///
/// ```no_run
/// use template_updater::banner::{Summary, print_summary};
///
/// print_summary(&Summary {
///     template: "welcome.sql",
///     ticket: "TICKET-42",
///     base: "develop",
///     replaced: 1,
/// });
/// ```
pub fn print_summary(summary: &Summary<'_>) {
    let lines = summary_lines(summary);

    let max_width = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(0)
        + 2;

    let border = "═".repeat(max_width);
    let top = style(format!("╔{}╗", border)).blue().bold();
    let bottom = style(format!("╚{}╝", border)).blue().bold();
    let left = style("║ ").blue().bold().to_string();
    let right = style("║").blue().bold().to_string();

    println!();
    println!("{top}");
    for line in lines {
        let pad = max_width - measure_text_width(&line);
        println!("{}{}{}{}", left, line, " ".repeat(pad - 1), right);
    }
    println!("{bottom}");
    println!();
}

/// Constructs the lines of the change summary, in display order: title,
/// template, ticket branch, base branch, and a warning when nothing was
/// replaced.
///
/// Values are styled (cyan, or dim `(none)` when empty), so callers must
/// measure **visible** width with `console::measure_text_width`.
fn summary_lines(summary: &Summary<'_>) -> Vec<String> {
    let or_none = |s: &str| {
        if s.is_empty() {
            style("(none)").dim().to_string()
        } else {
            style(s).cyan().bold().to_string()
        }
    };

    let mut lines = vec![
        "Summary of changes:".to_string(),
        String::new(),
        format!("Template: {}", or_none(summary.template)),
        format!("Ticket branch: {}", or_none(summary.ticket)),
        format!("Base branch: {}", or_none(summary.base)),
    ];
    if summary.replaced == 0 {
        lines.push(String::new());
        lines.push(
            style("No `SET @html_content` line was replaced.")
                .yellow()
                .bold()
                .to_string(),
        );
    }
    lines
}
