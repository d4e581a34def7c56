use std::ops::Range;

use logos::Logos;

/// Flat tokens for marker discovery. Every byte of the input belongs to
/// exactly one token, so the walker never sees a lexer error for valid UTF-8.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawToken {
	#[token("<!--")]
	CommentOpen,
	#[token("-->")]
	CommentClose,
	#[token("outlet")]
	Keyword,
	#[token(":")]
	Colon,
	#[regex(r"\s+")]
	Whitespace,
	#[token("<")]
	Lt,
	#[token("-")]
	Dash,
	#[regex(r"[^<\-:\s]+")]
	Text,
}

/// Tokenize `source` into raw tokens with their byte spans. Bytes that fail to
/// lex are reported as [`RawToken::Text`] so they stay inert.
pub(crate) fn lex(source: &str) -> Vec<(RawToken, Range<usize>)> {
	RawToken::lexer(source)
		.spanned()
		.map(|(token, span)| (token.unwrap_or(RawToken::Text), span))
		.collect()
}
