//! Terminal detection and the per-invocation UI context.

use std::io::IsTerminal;

use trace_core::theme::ThemeMode;

const FALLBACK_WIDTH: usize = 80;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// A single JSON document and nothing else
    Json,
    /// `key=value` lines and tab-separated rows for scripts
    #[default]
    Plain,
    /// Colors, badges and bordered tables
    Pretty,
}

impl OutputMode {
    pub fn is_json(&self) -> bool {
        *self == OutputMode::Json
    }

    pub fn is_pretty(&self) -> bool {
        *self == OutputMode::Pretty
    }
}

/// What the process learned about its terminal at startup.
#[derive(Debug, Clone, Default)]
pub struct TerminalEnv {
    pub stdout_tty: bool,
    pub dumb: bool,
    pub no_color: bool,
    pub columns: Option<usize>,
}

impl TerminalEnv {
    pub fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|term| term == "dumb"),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: columns_from_env().or_else(query_columns),
        }
    }
}

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    pub is_tty: bool,
    pub color: bool,
    pub unicode: bool,
    pub width: usize,
    pub mode: OutputMode,
    /// Stored light/dark preference
    pub palette: ThemeMode,
}

impl UiContext {
    /// Context for this process's stdout.
    pub fn from_env(json_flag: bool, no_color_flag: bool, palette: ThemeMode) -> Self {
        Self::resolve(&TerminalEnv::detect(), json_flag, no_color_flag, palette)
    }

    /// `--json` always wins. Pretty output needs a real, non-dumb terminal.
    pub fn resolve(
        env: &TerminalEnv,
        json_flag: bool,
        no_color_flag: bool,
        palette: ThemeMode,
    ) -> Self {
        let fancy = env.stdout_tty && !env.dumb;
        let mode = match (json_flag, fancy) {
            (true, _) => OutputMode::Json,
            (false, true) => OutputMode::Pretty,
            (false, false) => OutputMode::Plain,
        };
        Self {
            is_tty: env.stdout_tty,
            color: fancy && !no_color_flag && !env.no_color,
            unicode: !env.dumb,
            width: env.columns.unwrap_or(FALLBACK_WIDTH),
            mode,
            palette,
        }
    }

    /// Spinners only draw on an interactive pretty terminal.
    pub fn allows_animation(&self) -> bool {
        self.is_tty && self.mode.is_pretty()
    }
}

fn columns_from_env() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()?
        .parse::<usize>()
        .ok()
        .filter(|cols| *cols > 0)
}

#[cfg(unix)]
fn query_columns() -> Option<usize> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCGWINSZ writes a winsize into the pointer and nothing else.
    let ptr: *mut libc::winsize = &mut size;
    let status = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, ptr) };
    (status == 0 && size.ws_col > 0).then_some(usize::from(size.ws_col))
}

#[cfg(not(unix))]
fn query_columns() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty() -> TerminalEnv {
        TerminalEnv {
            stdout_tty: true,
            columns: Some(120),
            ..TerminalEnv::default()
        }
    }

    #[test]
    fn test_json_flag_wins_everywhere() {
        let ctx = UiContext::resolve(&tty(), true, false, ThemeMode::Light);
        assert!(ctx.mode.is_json());
        assert!(!ctx.allows_animation());

        let piped = UiContext::resolve(&TerminalEnv::default(), true, false, ThemeMode::Light);
        assert!(piped.mode.is_json());
    }

    #[test]
    fn test_tty_is_pretty_and_colored() {
        let ctx = UiContext::resolve(&tty(), false, false, ThemeMode::Dark);
        assert_eq!(ctx.mode, OutputMode::Pretty);
        assert!(ctx.color);
        assert!(ctx.allows_animation());
        assert_eq!(ctx.width, 120);
        assert_eq!(ctx.palette, ThemeMode::Dark);
    }

    #[test]
    fn test_dumb_terminal_is_plain_ascii() {
        let env = TerminalEnv {
            dumb: true,
            ..tty()
        };
        let ctx = UiContext::resolve(&env, false, false, ThemeMode::Light);
        assert_eq!(ctx.mode, OutputMode::Plain);
        assert!(!ctx.unicode);
        assert!(!ctx.color);
    }

    #[test]
    fn test_color_opt_outs() {
        assert!(!UiContext::resolve(&tty(), false, true, ThemeMode::Light).color);
        let env = TerminalEnv {
            no_color: true,
            ..tty()
        };
        assert!(!UiContext::resolve(&env, false, false, ThemeMode::Light).color);
    }

    #[test]
    fn test_piped_output_defaults() {
        let ctx = UiContext::resolve(&TerminalEnv::default(), false, false, ThemeMode::Light);
        assert_eq!(ctx.mode, OutputMode::Plain);
        assert_eq!(ctx.width, FALLBACK_WIDTH);
    }
}
