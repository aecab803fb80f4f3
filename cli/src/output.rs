use keyarmor::LineEnding;

#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub(crate) enum LineEndingArg {
    #[default]
    Lf,
    Crlf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Lf => LineEnding::Lf,
            LineEndingArg::Crlf => LineEnding::CrLf,
        }
    }
}
