pub mod commands;
pub mod session;

use clap::ValueEnum;
use vitae_core::ExportFormat;

#[derive(ValueEnum, Clone, Debug, Copy)]
pub enum CliExportFormat {
    Pdf,
    Word,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(f: CliExportFormat) -> Self {
        match f {
            CliExportFormat::Pdf => ExportFormat::Pdf,
            CliExportFormat::Word => ExportFormat::Word,
        }
    }
}
