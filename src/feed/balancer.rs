//! Closing of unterminated HTML start tags.
//!
//! The scan keeps a stack of open tag names. Any end tag pops the most recent
//! entry without comparing names, so `<div><span></div>` is considered to have
//! `div` still open. This is looser than a well-formedness check and is kept
//! as is: changing it alters the produced feed.

use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{TagKind, Token, TokenSink, TokenSinkResult, TokenizerOpts};

use super::html::tokenize;

/// Tracks open tag names while the tokenizer runs.
///
/// Content of raw-text elements is not tokenized, so markup inside
/// `<script>` or `<noscript>` never opens anything.
#[derive(Default)]
struct OpenTags {
    names: Vec<String>,
}

fn raw_kind(name: &str) -> Option<TokenSinkResult<()>> {
    let kind = match name {
        "iframe" | "noembed" | "noframes" | "noscript" | "style" | "xmp" => RawKind::Rawtext,
        "textarea" | "title" => RawKind::Rcdata,
        "script" => RawKind::ScriptData,
        "plaintext" => return Some(TokenSinkResult::Plaintext),
        _ => return None,
    };
    Some(TokenSinkResult::RawData(kind))
}

impl TokenSink for OpenTags {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let Token::TagToken(tag) = token else {
            return TokenSinkResult::Continue;
        };

        match tag.kind {
            TagKind::StartTag if tag.self_closing => TokenSinkResult::Continue,
            TagKind::StartTag => {
                let name = tag.name.to_string();
                let next = raw_kind(&name).unwrap_or(TokenSinkResult::Continue);
                self.names.push(name);
                next
            }
            TagKind::EndTag => {
                self.names.pop();
                TokenSinkResult::Continue
            }
        }
    }
}

/// Appends a closing tag for every start tag left open in `input`, most
/// recently opened first.
///
/// Never fails: malformed markup stops the scan and whatever is still open
/// at that point gets closed. Void elements are not special-cased, so `<br>`
/// is closed as `</br>` while `<br/>` is left alone.
///
/// # Examples
///
/// ```
/// use yml_feed_rs::feed::balancer::balance;
///
/// assert_eq!(balance("<div><p>Hello"), "<div><p>Hello</p></div>");
/// assert_eq!(balance("<b>done</b>"), "<b>done</b>");
/// ```
pub fn balance(input: &str) -> String {
    let open_tags = tokenize(input, OpenTags::default(), TokenizerOpts::default()).names;

    let closing_len: usize = open_tags.iter().map(|name| name.len() + 3).sum();
    let mut balanced = String::with_capacity(input.len() + closing_len);
    balanced.push_str(input);
    for name in open_tags.iter().rev() {
        balanced.push_str("</");
        balanced.push_str(name);
        balanced.push('>');
    }
    balanced
}
