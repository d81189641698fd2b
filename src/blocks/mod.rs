//! Block parsing: `DocumentParser` consumes a document one line at a time,
//! maintaining a tree of open containers rooted at a `Document` block,
//! and finalizes it into an arena-backed [`Document`] (§4.2, §4.3).
//!
//! ## Modules
//!
//! - [`types`]: the arena [`Block`]/[`BlockId`]/[`BlockType`] data model.
//! - [`kinds`]: block-specific recognizers, each owning its own delimiter
//!   knowledge (block quote, code fence, ATX/setext header, horizontal
//!   rule, indented code, HTML block open pattern, list marker).
//! - [`scan`]: column-counting helpers shared by the container-match walk
//!   and the recognizers.

pub mod kinds;
pub mod scan;
pub mod types;

pub use types::{Block, BlockId, BlockType, ListData, ListType};

use crate::error::BlockError;
use crate::inline::InlineParser;

const ROOT: BlockId = 0;

/// The finished parse result: an arena of [`Block`]s plus the id of the
/// `Document` root. `BlockId`s are only meaningful together with the
/// arena that produced them, so they travel together here rather than
/// as a bare [`Block`].
#[derive(Debug, Clone)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub root: BlockId,
}

impl Document {
    pub fn root(&self) -> &Block {
        &self.blocks[self.root]
    }

    pub fn get(&self, id: BlockId) -> &Block {
        &self.blocks[id]
    }

    pub fn children(&self, id: BlockId) -> impl Iterator<Item = &Block> {
        self.blocks[id].children.iter().map(move |&c| &self.blocks[c])
    }
}

/// Line-oriented block parser. Consumes lines via [`Self::incorporate_line`]
/// and produces a finished [`Document`] via [`Self::finish`].
pub struct DocumentParser {
    blocks: Vec<Block>,
    tip: BlockId,
    last_line_number: usize,
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser {
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::new(BlockType::Document, 1, 1)],
            tip: ROOT,
            last_line_number: 0,
        }
    }

    /// The open-spine path from the Document root down to the current
    /// tip, derived by walking parent pointers from `tip` and reversing.
    fn spine(&self) -> Vec<BlockId> {
        let mut path = Vec::new();
        let mut cur = Some(self.tip);
        while let Some(id) = cur {
            path.push(id);
            cur = self.blocks[id].parent;
        }
        path.reverse();
        path
    }

    /// Creates `block_type` as a child of the closest ancestor of `tip`
    /// (inclusive) whose `can_contain` accepts it, finalizing any open
    /// blocks below that ancestor along the way.
    fn add_child(&mut self, block_type: BlockType, line_number: usize, column: usize) -> BlockId {
        loop {
            if self.blocks[self.tip].block_type.can_contain(&block_type) {
                break;
            }
            let cur = self.tip;
            self.finalize(cur, line_number.saturating_sub(1));
        }
        let parent = self.tip;
        let mut block = Block::new(block_type, line_number, column);
        block.parent = Some(parent);
        let id = self.blocks.len();
        log::trace!("opening {} at line {line_number}", block.block_type.name());
        self.blocks.push(block);
        self.blocks[parent].children.push(id);
        self.tip = id;
        id
    }

    fn append_text(&mut self, id: BlockId, text: &str) {
        self.blocks[id].strings.push(text.to_string());
    }

    /// Finalizes `id`: marks it closed, records `end_line`, runs its
    /// per-type post-processing, and moves `tip` to its parent.
    fn finalize(&mut self, id: BlockId, end_line: usize) {
        if !self.blocks[id].open {
            return;
        }
        log::debug!("finalizing {} (line {end_line})", self.blocks[id].block_type.name());
        self.blocks[id].open = false;
        self.blocks[id].end_line = end_line;

        match self.blocks[id].block_type.clone() {
            BlockType::Paragraph => {
                let joined = self.blocks[id]
                    .strings
                    .iter()
                    .map(|s| s.trim_start_matches(' '))
                    .collect::<Vec<_>>()
                    .join("\n");
                let mut content = joined;
                let inline_parser = InlineParser::new();
                while content.starts_with('[') {
                    if !inline_parser.parse_reference(&mut content) {
                        break;
                    }
                }
                if content.trim().is_empty() {
                    self.blocks[id].block_type = BlockType::ReferenceDef;
                }
                self.blocks[id].string_content = content;
            }
            BlockType::ATXHeader { .. } | BlockType::SetextHeader { .. } | BlockType::HtmlBlock => {
                self.blocks[id].string_content = self.blocks[id].strings.join("\n");
            }
            BlockType::IndentedCode => {
                let joined = self.blocks[id].strings.join("\n");
                let trimmed = joined.trim_end_matches(|c: char| c == '\n' || c == ' ');
                self.blocks[id].string_content = format!("{trimmed}\n");
            }
            BlockType::FencedCode { .. } => {
                let strings = &self.blocks[id].strings;
                self.blocks[id].string_content = if strings.len() <= 1 {
                    String::new()
                } else {
                    format!("{}\n", strings[1..].join("\n"))
                };
            }
            BlockType::List { .. } => {
                self.resolve_list_tightness(id);
            }
            _ => {}
        }

        self.tip = self.blocks[id].parent.unwrap_or(ROOT);
    }

    fn resolve_list_tightness(&mut self, list_id: BlockId) {
        let items = self.blocks[list_id].children.clone();
        let mut loose = false;
        let n = items.len();
        for (i, &item_id) in items.iter().enumerate() {
            if i + 1 != n && self.ends_with_blank(item_id) {
                loose = true;
            }
            let item_children = self.blocks[item_id].children.clone();
            let m = item_children.len();
            for (j, &child_id) in item_children.iter().enumerate() {
                if j + 1 != m && self.ends_with_blank(child_id) {
                    loose = true;
                }
            }
        }
        if let BlockType::List { tight, .. } = &mut self.blocks[list_id].block_type {
            *tight = !loose;
        }
        log::debug!("list {list_id} resolved tight={}", !loose);
    }

    fn ends_with_blank(&self, id: BlockId) -> bool {
        if self.blocks[id].last_line_blank {
            return true;
        }
        match &self.blocks[id].block_type {
            BlockType::List { .. } | BlockType::ListItem { .. } => self.blocks[id]
                .children
                .last()
                .map(|&c| self.ends_with_blank(c))
                .unwrap_or(false),
            _ => false,
        }
    }

    fn enclosing_list(&self, from: BlockId) -> Option<BlockId> {
        let mut cur = Some(from);
        while let Some(id) = cur {
            if matches!(self.blocks[id].block_type, BlockType::List { .. }) {
                return Some(id);
            }
            cur = self.blocks[id].parent;
        }
        None
    }

    fn clear_ancestor_blank(&mut self, id: BlockId) {
        let mut cur = self.blocks[id].parent;
        while let Some(pid) = cur {
            self.blocks[pid].last_line_blank = false;
            cur = self.blocks[pid].parent;
        }
    }

    fn should_remember_blank(&self, id: BlockId, line_number: usize) -> bool {
        match &self.blocks[id].block_type {
            BlockType::BlockQuote | BlockType::FencedCode { .. } => false,
            BlockType::ListItem { .. } => {
                !(self.blocks[id].start_line == line_number
                    && self.blocks[id].strings.is_empty()
                    && self.blocks[id].children.is_empty())
            }
            _ => true,
        }
    }

    fn break_out_of_lists(&mut self, list_id: BlockId, line_number: usize) {
        loop {
            let cur = self.tip;
            self.finalize(cur, line_number.saturating_sub(1));
            if cur == list_id {
                break;
            }
        }
    }

    fn close_unmatched_blocks(&mut self, last_matched: BlockId, line_number: usize) {
        while self.tip != last_matched {
            let cur = self.tip;
            self.finalize(cur, line_number.saturating_sub(1));
        }
    }

    fn try_continue(&mut self, id: BlockId, line: &str, offset: usize) -> Option<usize> {
        let block_type = self.blocks[id].block_type.clone();
        match block_type {
            BlockType::BlockQuote => kinds::BlockQuote::try_consume(line, offset),
            BlockType::ListItem { data } => {
                if scan::is_blank(line, offset) {
                    Some(scan::first_non_space(line, offset))
                } else if scan::indent_width(line, offset) >= data.marker_offset + data.padding {
                    Some(offset + data.marker_offset + data.padding)
                } else {
                    None
                }
            }
            BlockType::IndentedCode => {
                if scan::is_blank(line, offset) {
                    Some(scan::first_non_space(line, offset))
                } else if scan::indent_width(line, offset) >= kinds::IndentedCode::INDENT {
                    Some(offset + kinds::IndentedCode::INDENT)
                } else {
                    None
                }
            }
            BlockType::ATXHeader { .. }
            | BlockType::SetextHeader { .. }
            | BlockType::HorizontalRule => None,
            BlockType::FencedCode {
                offset: fence_offset,
                ..
            } => {
                let skip = scan::indent_width(line, offset).min(fence_offset);
                Some(offset + skip)
            }
            BlockType::HtmlBlock => {
                if scan::is_blank(line, offset) {
                    None
                } else {
                    Some(offset)
                }
            }
            BlockType::Paragraph => {
                if scan::is_blank(line, offset) {
                    self.blocks[id].last_line_blank = true;
                    None
                } else {
                    Some(offset)
                }
            }
            BlockType::Document | BlockType::List { .. } => Some(offset),
            BlockType::ReferenceDef => Some(offset),
        }
    }

    fn try_open_indented_code(&mut self, line: &str, offset: usize, line_number: usize) -> Option<usize> {
        if scan::is_blank(line, offset) {
            return None;
        }
        if matches!(self.blocks[self.tip].block_type, BlockType::Paragraph) {
            return None;
        }
        if !kinds::IndentedCode::matches(line, offset) {
            return None;
        }
        self.add_child(BlockType::IndentedCode, line_number, offset + kinds::IndentedCode::INDENT + 1);
        Some(offset + kinds::IndentedCode::INDENT)
    }

    fn try_open_block_quote(&mut self, line: &str, offset: usize, line_number: usize) -> Option<usize> {
        let new_offset = kinds::BlockQuote::try_consume(line, offset)?;
        self.add_child(BlockType::BlockQuote, line_number, offset + 1);
        Some(new_offset)
    }

    fn try_open_atx_header(&mut self, line: &str, offset: usize, line_number: usize) -> Option<usize> {
        let (level, content) = kinds::AtxHeader::try_open(line, offset)?;
        let id = self.add_child(BlockType::ATXHeader { level }, line_number, offset + 1);
        self.blocks[id].strings.push(content);
        Some(line.len())
    }

    fn try_open_fenced_code(&mut self, line: &str, offset: usize, line_number: usize) -> Option<usize> {
        let open = kinds::CodeFence::try_open(line, offset)?;
        self.add_child(
            BlockType::FencedCode {
                offset: open.offset,
                fence_length: open.fence_length,
                fence_char: open.fence_char,
                info: open.info,
            },
            line_number,
            offset + 1,
        );
        Some(line.len())
    }

    fn try_open_html_block(&mut self, line: &str, offset: usize, line_number: usize) -> Option<usize> {
        if !kinds::HtmlBlock::matches_open(line, offset) {
            return None;
        }
        self.add_child(BlockType::HtmlBlock, line_number, offset + 1);
        Some(offset)
    }

    fn try_open_horizontal_rule(&mut self, line: &str, offset: usize, line_number: usize) -> Option<usize> {
        if !kinds::HorizontalRule::matches(line, offset) {
            return None;
        }
        self.add_child(BlockType::HorizontalRule, line_number, offset + 1);
        Some(line.len())
    }

    fn try_open_list_item(&mut self, line: &str, offset: usize, line_number: usize) -> Option<usize> {
        let marker_start = scan::first_non_space(line, offset);
        if marker_start >= line.len() {
            return None;
        }
        let mut data = kinds::ListMarker::parse(line, marker_start)?;
        data.marker_offset = marker_start - offset;

        let tip_list_kind = match &self.blocks[self.tip].block_type {
            BlockType::List { data: existing, .. } => Some(existing.list_type),
            _ => None,
        };
        let needs_new_list = match tip_list_kind {
            Some(existing_kind) if existing_kind.same_kind(&data.list_type) => false,
            Some(_) => {
                let cur = self.tip;
                self.finalize(cur, line_number.saturating_sub(1));
                true
            }
            None => true,
        };

        if needs_new_list {
            self.add_child(
                BlockType::List {
                    data,
                    tight: true,
                },
                line_number,
                offset + data.marker_offset + 1,
            );
        }

        let padding = data.padding;
        let marker_offset = data.marker_offset;
        self.add_child(
            BlockType::ListItem {
                data: ListData {
                    marker_offset,
                    padding,
                    list_type: data.list_type,
                },
            },
            line_number,
            offset + marker_offset + 1,
        );
        Some(offset + marker_offset + padding)
    }

    /// Updates the tree with one line of input (§4.2).
    pub fn incorporate_line(&mut self, line: &str, line_number: usize) -> Result<(), BlockError> {
        self.last_line_number = line_number;
        let spine = self.spine();

        // (a) container match walk
        let mut offset = 0usize;
        let mut last_matched = ROOT;
        for &id in spine.iter() {
            if !self.blocks[id].open {
                return Err(BlockError {
                    line_number,
                    container_type: self.blocks[id].block_type.name(),
                });
            }
            if id == ROOT {
                last_matched = ROOT;
                continue;
            }
            match self.try_continue(id, line, offset) {
                Some(new_offset) => {
                    offset = new_offset;
                    last_matched = id;
                }
                None => break,
            }
        }

        // (b) two consecutive blank lines inside a list break out of it.
        // This streak lives in `list_blank_streak`, not `last_line_blank`:
        // `clear_ancestor_blank` below resets `last_line_blank` on every
        // non-blank line as part of tightness bookkeeping, which would wipe
        // a same-line write before the *next* line ever reads it back.
        if let Some(list_id) = self.enclosing_list(last_matched) {
            if scan::is_blank(line, offset) {
                let was_blank = self.blocks[list_id].list_blank_streak;
                self.blocks[list_id].list_blank_streak = true;
                if was_blank {
                    self.break_out_of_lists(list_id, line_number);
                    last_matched = self.blocks[list_id].parent.unwrap_or(ROOT);
                }
            } else {
                self.blocks[list_id].list_blank_streak = false;
            }
        }

        // setext header rewrite (item 6), checked against the matched
        // container before any other opener is attempted
        if matches!(self.blocks[last_matched].block_type, BlockType::Paragraph)
            && self.blocks[last_matched].strings.len() == 1
            && !scan::is_blank(line, offset)
        {
            if let Some(level) = kinds::SetextHeader::try_match(line, offset) {
                self.blocks[last_matched].block_type = BlockType::SetextHeader { level };
                self.finalize(last_matched, line_number);
                return Ok(());
            }
        }

        // lazy continuation
        let tip_is_open_paragraph = matches!(self.blocks[self.tip].block_type, BlockType::Paragraph)
            && !self.blocks[self.tip].strings.is_empty();
        if self.tip != last_matched && !scan::is_blank(line, offset) && tip_is_open_paragraph {
            let tip = self.tip;
            self.append_text(tip, &line[offset..]);
            self.blocks[tip].last_line_blank = false;
            return Ok(());
        }

        self.close_unmatched_blocks(last_matched, line_number);

        let blank_now = scan::is_blank(line, offset);
        let remember = self.should_remember_blank(self.tip, line_number);
        self.blocks[self.tip].last_line_blank = blank_now && remember;
        self.clear_ancestor_blank(self.tip);

        // (c) new-block opening
        if !self.blocks[self.tip].block_type.accepts_lines() {
            loop {
                if scan::is_blank(line, offset) {
                    break;
                }
                let opened = self
                    .try_open_indented_code(line, offset, line_number)
                    .or_else(|| self.try_open_block_quote(line, offset, line_number))
                    .or_else(|| self.try_open_atx_header(line, offset, line_number))
                    .or_else(|| self.try_open_fenced_code(line, offset, line_number))
                    .or_else(|| self.try_open_html_block(line, offset, line_number))
                    .or_else(|| self.try_open_horizontal_rule(line, offset, line_number))
                    .or_else(|| self.try_open_list_item(line, offset, line_number));
                match opened {
                    Some(new_offset) => {
                        offset = new_offset;
                        if self.blocks[self.tip].block_type.accepts_lines() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }

        // (d) line append
        let first_ns = scan::first_non_space(line, offset);
        match self.blocks[self.tip].block_type.clone() {
            BlockType::IndentedCode | BlockType::HtmlBlock => {
                let tip = self.tip;
                self.append_text(tip, &line[offset.min(line.len())..]);
            }
            BlockType::FencedCode {
                fence_char,
                fence_length,
                ..
            } => {
                if scan::indent_width(line, offset) <= 3
                    && kinds::CodeFence::closes(line, offset, fence_char, fence_length)
                {
                    let tip = self.tip;
                    self.finalize(tip, line_number);
                } else {
                    let tip = self.tip;
                    self.append_text(tip, &line[offset.min(line.len())..]);
                }
            }
            BlockType::ATXHeader { .. } | BlockType::SetextHeader { .. } | BlockType::HorizontalRule => {}
            _ => {
                if self.blocks[self.tip].block_type.accepts_lines() {
                    let tip = self.tip;
                    self.append_text(tip, &line[first_ns.min(line.len())..]);
                } else if !scan::is_blank(line, offset) {
                    self.add_child(BlockType::Paragraph, line_number, first_ns + 1);
                    let tip = self.tip;
                    self.append_text(tip, &line[first_ns.min(line.len())..]);
                }
            }
        }

        Ok(())
    }

    /// Finalizes every still-open block and runs the inline phase over
    /// every inline-capable leaf, returning the finished [`Document`].
    pub fn finish(&mut self) -> Document {
        let last_line = self.last_line_number.max(1);
        loop {
            let cur = self.tip;
            self.finalize(cur, last_line);
            if cur == ROOT {
                break;
            }
        }
        self.run_inline_phase();
        Document {
            blocks: self.blocks.clone(),
            root: ROOT,
        }
    }

    fn run_inline_phase(&mut self) {
        let parser = InlineParser::new();
        for id in 0..self.blocks.len() {
            if self.blocks[id].block_type.is_inline_capable() {
                let content = self.blocks[id].string_content.clone();
                self.blocks[id].inline_content = parser.parse(&content);
            }
        }
    }
}
