//! Single-line task input that highlights the due-date phrase as you type.
//!
//! The field content is a list of styled segments. Every edit re-runs
//! [`parse_time_from_text`] over the whole text and rebuilds the segments as
//! before / match / after. The caret is a position inside one segment, so a
//! rebuild first flattens it to a character offset and then finds the same
//! offset in the new segments.

use crate::libs::time_parser::{parse_time_from_text, strip_match, MatchInfo, ParsedTime};
use crate::msg_debug;
use chrono::NaiveDateTime;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::{style, Stylize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStyle {
    Plain,
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: SegmentStyle,
}

impl Segment {
    fn new(text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Caret position as a segment index plus a character offset inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caret {
    pub segment: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    segments: Vec<Segment>,
}

impl StyledText {
    pub fn plain(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            segments: vec![Segment::new(text, SegmentStyle::Plain)],
        }
    }

    /// Splits `text` around `span`, dropping empty pieces.
    pub fn highlighted(text: &str, span: &MatchInfo) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let end = span.end.min(chars.len());
        let start = span.start.min(end);

        let pieces = [
            (&chars[..start], SegmentStyle::Plain),
            (&chars[start..end], SegmentStyle::Highlight),
            (&chars[end..], SegmentStyle::Plain),
        ];
        let segments = pieces
            .iter()
            .filter(|(piece, _)| !piece.is_empty())
            .map(|(piece, style)| Segment::new(piece.iter().collect::<String>(), *style))
            .collect();

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn char_len(&self) -> usize {
        self.segments.iter().map(Segment::char_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.is_empty())
    }

    /// Text of the first highlighted segment.
    pub fn highlight(&self) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.style == SegmentStyle::Highlight)
            .map(|s| s.text.as_str())
    }

    /// Flattens a caret into a character offset from the start of the text.
    pub fn offset_of(&self, caret: Caret) -> Option<usize> {
        let segment = self.segments.get(caret.segment)?;
        if caret.offset > segment.char_len() {
            return None;
        }
        let before: usize = self.segments[..caret.segment].iter().map(Segment::char_len).sum();
        Some(before + caret.offset)
    }

    /// Finds the segment holding character offset `offset`.
    ///
    /// Offsets on a boundary resolve to the end of the earlier segment.
    pub fn locate(&self, offset: usize) -> Option<Caret> {
        let mut walked = 0;
        for (index, segment) in self.segments.iter().enumerate() {
            let len = segment.char_len();
            if offset <= walked + len {
                return Some(Caret {
                    segment: index,
                    offset: offset - walked,
                });
            }
            walked += len;
        }
        None
    }

    pub fn end(&self) -> Caret {
        match self.segments.last() {
            Some(last) => Caret {
                segment: self.segments.len() - 1,
                offset: last.char_len(),
            },
            None => Caret::default(),
        }
    }

    fn insert_str(&mut self, caret: Caret, text: &str) -> Caret {
        if self.segments.is_empty() {
            self.segments.push(Segment::new(text, SegmentStyle::Plain));
            return self.end();
        }
        let segment = &mut self.segments[caret.segment];
        let byte = byte_index(&segment.text, caret.offset);
        segment.text.insert_str(byte, text);
        Caret {
            segment: caret.segment,
            offset: caret.offset + text.chars().count(),
        }
    }

    /// Removes the character ending at `offset` (the one a backspace would).
    fn remove_before(&mut self, offset: usize) -> bool {
        if offset == 0 {
            return false;
        }
        match self.locate(offset - 1) {
            Some(caret) => self.remove_in_segment(caret, offset - 1),
            None => false,
        }
    }

    fn remove_in_segment(&mut self, caret: Caret, offset: usize) -> bool {
        // A boundary offset belongs to the earlier segment; the character
        // itself lives at the start of the next non-empty one.
        let mut index = caret.segment;
        let mut inner = caret.offset;
        while index < self.segments.len() && inner >= self.segments[index].char_len() {
            index += 1;
            inner = 0;
        }
        let Some(segment) = self.segments.get_mut(index) else {
            msg_debug!(format!("no character at offset {}", offset));
            return false;
        };
        let byte = byte_index(&segment.text, inner);
        segment.text.remove(byte);
        true
    }

    /// Splits the segment at `caret` and puts a plain segment in between.
    fn insert_segment(&mut self, caret: Caret, text: &str) -> Caret {
        if self.segments.is_empty() {
            self.segments.push(Segment::new(text, SegmentStyle::Plain));
            return self.end();
        }
        let current = &mut self.segments[caret.segment];
        let byte = byte_index(&current.text, caret.offset);
        let tail = current.text.split_off(byte);
        let style = current.style;

        let inserted = caret.segment + 1;
        self.segments.insert(inserted, Segment::new(text, SegmentStyle::Plain));
        if !tail.is_empty() {
            self.segments.insert(inserted + 1, Segment::new(tail, style));
        }
        Caret {
            segment: inserted,
            offset: text.chars().count(),
        }
    }

    /// Terminal rendering; `reverse` replaces the color highlight with
    /// reverse video for high-contrast output.
    pub fn render(&self, reverse: bool) -> String {
        self.segments
            .iter()
            .map(|segment| match segment.style {
                SegmentStyle::Plain => segment.text.clone(),
                SegmentStyle::Highlight if reverse => style(segment.text.as_str()).reverse().to_string(),
                SegmentStyle::Highlight => style(segment.text.as_str()).cyan().underlined().to_string(),
            })
            .collect()
    }
}

fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices().nth(char_offset).map(|(i, _)| i).unwrap_or(text.len())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Insert(char),
    Paste(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
    Enter,
    Cancel,
}

impl FieldEvent {
    /// Maps a terminal key press to a field event.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(FieldEvent::Cancel),
                KeyCode::Char('u') => Some(FieldEvent::Clear),
                KeyCode::Char('a') => Some(FieldEvent::Home),
                KeyCode::Char('e') => Some(FieldEvent::End),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Char(c) => Some(FieldEvent::Insert(c)),
            KeyCode::Backspace => Some(FieldEvent::Backspace),
            KeyCode::Delete => Some(FieldEvent::Delete),
            KeyCode::Left => Some(FieldEvent::Left),
            KeyCode::Right => Some(FieldEvent::Right),
            KeyCode::Home => Some(FieldEvent::Home),
            KeyCode::End => Some(FieldEvent::End),
            KeyCode::Enter => Some(FieldEvent::Enter),
            KeyCode::Esc => Some(FieldEvent::Cancel),
            _ => None,
        }
    }
}

/// What the field wants its owner to do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAction {
    None,
    Submit(Submission),
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub raw: String,
    /// Text with the date phrase removed; the raw text when nothing else remains.
    pub title: String,
    pub due: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct EditableField {
    content: StyledText,
    caret: Caret,
    parsed: ParsedTime,
    now: NaiveDateTime,
}

impl EditableField {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            content: StyledText::default(),
            caret: Caret::default(),
            parsed: ParsedTime::default(),
            now,
        }
    }

    pub fn with_text(text: &str, now: NaiveDateTime) -> Self {
        let mut field = Self::new(now);
        field.content = StyledText::plain(text);
        field.caret = field.content.end();
        field.rehighlight();
        field
    }

    pub fn content(&self) -> &StyledText {
        &self.content
    }

    pub fn text(&self) -> String {
        self.content.text()
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn parsed(&self) -> ParsedTime {
        self.parsed
    }

    /// Caret as a character offset, or the end of the text when the caret
    /// no longer points into the content.
    pub fn caret_offset(&self) -> usize {
        match self.content.offset_of(self.caret) {
            Some(offset) => offset,
            None => {
                msg_debug!(format!("caret {:?} is outside the content", self.caret));
                self.content.char_len()
            }
        }
    }

    /// Places the caret at a character offset, clamped to the text.
    pub fn set_caret(&mut self, offset: usize) {
        let offset = offset.min(self.content.char_len());
        self.caret = self.content.locate(offset).unwrap_or_else(|| self.content.end());
    }

    pub fn handle(&mut self, event: FieldEvent) -> FieldAction {
        match event {
            FieldEvent::Insert(c) => {
                let c = if c == '\n' || c == '\r' { ' ' } else { c };
                let mut buf = [0u8; 4];
                self.caret = self.content.insert_str(self.caret, c.encode_utf8(&mut buf));
                self.rehighlight();
            }
            FieldEvent::Paste(text) => self.paste(&text),
            FieldEvent::Backspace => {
                let offset = self.caret_offset();
                if self.content.remove_before(offset) {
                    self.set_caret(offset - 1);
                    self.rehighlight();
                }
            }
            FieldEvent::Delete => {
                let offset = self.caret_offset();
                if offset < self.content.char_len() && self.content.remove_before(offset + 1) {
                    self.set_caret(offset);
                    self.rehighlight();
                }
            }
            FieldEvent::Left => {
                let offset = self.caret_offset();
                self.set_caret(offset.saturating_sub(1));
            }
            FieldEvent::Right => {
                let offset = self.caret_offset();
                self.set_caret(offset + 1);
            }
            FieldEvent::Home => self.set_caret(0),
            FieldEvent::End => self.caret = self.content.end(),
            FieldEvent::Clear => {
                self.content = StyledText::default();
                self.caret = Caret::default();
                self.parsed = ParsedTime::default();
            }
            FieldEvent::Enter => return self.submit(),
            FieldEvent::Cancel => return FieldAction::Cancel,
        }
        FieldAction::None
    }

    /// Inserts clipboard text verbatim as a plain segment; no re-detection.
    fn paste(&mut self, text: &str) {
        let flattened: String = text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }).collect();
        if flattened.is_empty() {
            return;
        }
        let offset = self.caret_offset();
        let caret = self.content.locate(offset).unwrap_or_else(|| self.content.end());
        self.caret = self.content.insert_segment(caret, &flattened);
    }

    /// Re-runs detection over the whole text and rebuilds the segments,
    /// keeping the caret at the same character offset.
    fn rehighlight(&mut self) {
        let text = self.content.text();
        if text.is_empty() {
            self.content = StyledText::default();
            self.caret = Caret::default();
            self.parsed = ParsedTime::default();
            return;
        }

        let offset = self.caret_offset();
        self.parsed = parse_time_from_text(&text, self.now);
        self.content = match &self.parsed.match_info {
            Some(span) => StyledText::highlighted(&text, span),
            None => StyledText::plain(&text),
        };

        self.caret = match self.content.locate(offset) {
            Some(caret) => caret,
            None => {
                msg_debug!(format!("could not restore caret at offset {}", offset));
                self.content.end()
            }
        };
    }

    fn submit(&self) -> FieldAction {
        let raw = self.content.text();
        if raw.trim().is_empty() {
            return FieldAction::None;
        }
        // Pasted text is not highlighted yet, so detect again on submit.
        let parsed = parse_time_from_text(&raw, self.now);
        let title = match &parsed.match_info {
            Some(span) => strip_match(&raw, span),
            None => raw.trim().to_string(),
        };
        let title = if title.is_empty() { raw.trim().to_string() } else { title };

        FieldAction::Submit(Submission {
            raw,
            title,
            due: parsed.time,
        })
    }
}
