use phrasetype::{MergedResource, PatternError, ProcessOutput, Token, Visibility};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(output: &ProcessOutput, color: bool) {
    let palette = ansi::Palette::new(color);

    println!("\n{}", palette.paint("━━━ Resources ━━━", ansi::GRAY));
    if output.resources.is_empty() {
        println!("{}", palette.dim("  No resources with a base variant"));
    }
    for resource in &output.resources {
        print_resource(resource, &palette);
    }

    let metrics = &output.metrics;
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Tokenize: {}  │  Merge: {}",
        palette.paint(format!("{:?}", metrics.total), ansi::GREEN),
        palette.paint(format!("{:?}", metrics.tokenize), ansi::CYAN),
        palette.dim(format!("{:?}", metrics.merge)),
    );
    println!(
        "  {} resource(s) from {} variant(s)  │  skipped: {}  │  duplicates: {}  │  parse errors: {}  │  failures: {}",
        metrics.resources, metrics.variants, metrics.skipped, metrics.duplicates, metrics.parse_errors, metrics.failures,
    );
    println!();
}

fn print_resource(resource: &MergedResource, palette: &ansi::Palette) {
    let visibility = match resource.visibility {
        Visibility::Public => palette.paint("public", ansi::GREEN),
        Visibility::Private => palette.dim("private"),
    };
    let mut header = format!("  {} {}", palette.bold(palette.paint(resource.name.as_str(), ansi::CYAN)), visibility);
    if resource.has_contiguous_numbered_args && !resource.arguments.is_empty() {
        header.push_str(&format!(" {}", palette.dim("positional")));
    }
    if resource.deprecation.is_deprecated() {
        header.push_str(&format!(" {}", palette.paint("deprecated", ansi::YELLOW)));
    }
    println!("{header}");

    if let Some(description) = &resource.description {
        println!("    {}", palette.dim(description));
    }
    for argument in &resource.arguments {
        println!(
            "    {} {} {} {}",
            palette.paint(&argument.parameter_name, ansi::BLUE),
            palette.bold(argument.argument_type.name()),
            palette.dim("│"),
            palette.dim(argument.capability.name()),
        );
    }
    for issue in &resource.parse_issues {
        println!("    {} {}", palette.paint("✗ parse", ansi::RED), issue);
    }
    for failure in &resource.failures {
        println!("    {} {}", palette.paint("✗", ansi::RED), failure);
    }
    for warning in &resource.warnings {
        println!("    {} {}", palette.paint("⚠", ansi::YELLOW), warning);
    }
}

pub fn print_tokens(pattern: &str, tokens: &[Token], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Pattern: \"{}\"", pattern), ansi::CYAN)));
    println!("\n{}", palette.paint("━━━ Tokens ━━━", ansi::GRAY));
    if tokens.is_empty() {
        println!("{}", palette.dim("  No placeholders"));
    }
    for (idx, token) in tokens.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(token.id.to_string(), ansi::GREEN)),
            palette.dim("│"),
            palette.paint(token.capability.name(), ansi::BLUE),
        );
    }
    println!();
}

pub fn print_pattern_error(pattern: &str, err: &PatternError, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Pattern: \"{}\"", pattern), ansi::CYAN)));
    println!("  {} {}", palette.paint("✗", ansi::RED), err);
    println!();
}
