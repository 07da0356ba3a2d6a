use super::SourceSpan;
use miette::{LabeledSpan, Severity};
use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// A user-facing diagnostic produced by the extractor or the generator
#[derive(Clone, Debug)]
pub struct PlannerDiagnostic {
	severity: Severity,
	error_text: String,
	help_text: Option<String>,
	error_code: Option<String>,
	labels: Vec<LabeledSpan>,
}

/// Used to conveniently craft diagnostic messages
pub struct DiagnosticBuilder {
	diag: PlannerDiagnostic,
}

impl From<PlannerDiagnostic> for DiagnosticBuilder {
	fn from(diag: PlannerDiagnostic) -> Self {
		Self { diag }
	}
}

impl DiagnosticBuilder {
	/// Creates an error diagnostic from an error type
	pub fn from_error<ErrorType>(err: &ErrorType) -> Self
	where
		ErrorType: Error,
	{
		Self::new_error(&err.to_string())
	}

	/// Creates a new error message
	pub fn new_error(msg: &str) -> Self {
		PlannerDiagnostic::new(Severity::Error, msg).into()
	}

	/// Creates a new warning message
	pub fn new_warning(msg: &str) -> Self {
		PlannerDiagnostic::new(Severity::Warning, msg).into()
	}

	/// Adds a source code label
	pub fn label(mut self, span: SourceSpan, msg: &str) -> Self {
		self.diag.labels.push(LabeledSpan::new_with_span(
			Some(String::from(msg)),
			miette::SourceSpan::from(span),
		));
		self
	}

	/// Attaches an error code
	pub fn code(mut self, code: &str) -> Self {
		self.diag.error_code = Some(code.into());
		self
	}

	/// Attaches a help message
	pub fn help(mut self, help: &str) -> Self {
		self.diag.help_text = Some(help.into());
		self
	}

	pub fn build(self) -> PlannerDiagnostic {
		self.diag
	}
}

impl PlannerDiagnostic {
	fn new(severity: Severity, msg: &str) -> Self {
		Self {
			severity,
			error_text: msg.into(),
			help_text: None,
			error_code: None,
			labels: Vec::new(),
		}
	}

	pub fn help_text(&self) -> Option<&str> {
		self.help_text.as_deref()
	}

	pub fn error_code(&self) -> Option<&str> {
		self.error_code.as_deref()
	}
}

impl Display for PlannerDiagnostic {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.error_text)
	}
}

impl Error for PlannerDiagnostic {}

impl miette::Diagnostic for PlannerDiagnostic {
	fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
		self.error_code
			.as_ref()
			.map(|code| Box::new(code) as Box<dyn Display + 'a>)
	}

	fn severity(&self) -> Option<Severity> {
		Some(self.severity)
	}

	fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
		self.help_text
			.as_ref()
			.map(|help| Box::new(help) as Box<dyn Display + 'a>)
	}

	fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
		if self.labels.is_empty() {
			return None;
		}
		Some(Box::new(self.labels.clone().into_iter()))
	}
}

/// Indicates that type can provide a PlannerDiagnostic message.
/// All error types surfaced to the user implement this trait.
pub trait ProvidesDiagnostic {
	fn to_diagnostic(&self) -> PlannerDiagnostic;

	/// Returns a Miette report
	fn to_miette_report(&self) -> miette::Report {
		miette::Report::new(self.to_diagnostic())
	}
}
