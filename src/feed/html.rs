//! Thin layer over the `html5ever` tokenizer shared by the tag balancer and
//! the entity decoder.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::{RawKind, State};
use html5ever::tokenizer::{
    BufferQueue, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// Runs `sink` over the whole of `input` and hands it back.
pub(crate) fn tokenize<S: TokenSink>(input: &str, sink: S, opts: TokenizerOpts) -> S {
    let mut queue = BufferQueue::new();
    queue.push_back(StrTendril::from_slice(input));

    let mut tokenizer = Tokenizer::new(sink, opts);
    let _ = tokenizer.feed(&mut queue);
    tokenizer.end();
    tokenizer.sink
}

/// Collects the character data of a document tokenized as RCDATA.
///
/// No start tag is recorded, so no end tag is ever appropriate and every `<`
/// stays text. Only character references are interpreted.
#[derive(Default)]
struct TextCollector {
    text: String,
}

impl TokenSink for TextCollector {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(chars) => self.text.push_str(&chars),
            Token::NullCharacterToken => self.text.push('\0'),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Decodes HTML character references the way HTML text content does,
/// including legacy named references without a trailing semicolon
/// (`&copy 2020` gives `© 2020`). Markup is left alone.
///
/// The tokenizer folds carriage returns into line feeds, so the input is
/// decoded piecewise around them to keep them byte for byte.
///
/// # Examples
///
/// ```
/// use yml_feed_rs::feed::html::unescape;
///
/// assert_eq!(unescape("&lt;p&gt;Tom&#39;s&lt;/p&gt;"), "<p>Tom's</p>");
/// assert_eq!(unescape("&ampB &copy 2020"), "&B © 2020");
/// ```
pub fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut decoded = String::with_capacity(text.len());
    for (index, piece) in text.split('\r').enumerate() {
        if index > 0 {
            decoded.push('\r');
        }
        if piece.contains('&') {
            decoded.push_str(&unescape_piece(piece));
        } else {
            decoded.push_str(piece);
        }
    }
    decoded
}

fn unescape_piece(piece: &str) -> String {
    let opts = TokenizerOpts {
        initial_state: Some(State::RawData(RawKind::Rcdata)),
        discard_bom: false,
        ..TokenizerOpts::default()
    };
    tokenize(piece, TextCollector::default(), opts).text
}
