//! Import/export validation for MDX parsing
//!
//! The MDX parser only recognizes ESM blocks when it is given a parser for
//! them. Existing imports must be recognized as such for import injection to
//! stay idempotent.

use markdown::MdxSignal;
use oxc_allocator::Allocator;
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;

use crate::utils::offset_to_line_col;

/// Validate an ESM block found in MDX using the OXC parser
pub(crate) fn validate_esm_syntax(code: &str) -> MdxSignal {
    let allocator = Allocator::default();

    let ParserReturn { errors, .. } = Parser::new(&allocator, code, SourceType::mjs()).parse();

    let Some(error) = errors.first() else {
        return MdxSignal::Ok;
    };

    let message = format!("Invalid ESM syntax: {}", error.message);
    let offset = error
        .labels
        .as_ref()
        .and_then(|labels| labels.first())
        .map(|label| label.offset())
        .unwrap_or(0);
    let (line, column) = offset_to_line_col(code, offset);
    let context = code
        .lines()
        .nth(line.saturating_sub(1))
        .unwrap_or("")
        .to_string();

    MdxSignal::Error(
        message,
        line,
        Box::new(format!("at line {}, column {}", line, column)),
        Box::new(context),
    )
}
