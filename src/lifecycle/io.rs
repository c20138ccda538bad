use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        f.write_str(label)
    }
}

/// Diagnostic output provided by the host.
pub trait Diagnostics {
    fn write_error(&self, severity: Severity, line: &str);

    fn is_verbose(&self) -> bool;
}

/// Writes diagnostics to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleIo {
    pub verbose: bool,
    pub quiet: bool,
}

impl ConsoleIo {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

impl Diagnostics for ConsoleIo {
    fn write_error(&self, severity: Severity, line: &str) {
        // Quiet mode still shows warnings.
        if self.quiet && severity == Severity::Info {
            return;
        }
        eprintln!("{}", line);
    }

    fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct BufferIo {
    verbose: bool,
    lines: RefCell<Vec<(Severity, String)>>,
}

impl BufferIo {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            lines: RefCell::new(Vec::new()),
        }
    }

    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.borrow().clone()
    }

    pub fn output(&self) -> String {
        self.lines
            .borrow()
            .iter()
            .map(|(_, line)| format!("{}\n", line))
            .collect()
    }
}

impl Diagnostics for BufferIo {
    fn write_error(&self, severity: Severity, line: &str) {
        self.lines.borrow_mut().push((severity, line.to_string()));
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}
