use tracing::info;

pub const REVIEW_SAVED_NOTICE: &str = "Your review has been saved (logged only).";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingStatus {
    WantToRead,
    Reading,
    Read,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 3] = [
        ReadingStatus::WantToRead,
        ReadingStatus::Reading,
        ReadingStatus::Read,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "Want to read",
            ReadingStatus::Reading => "Reading",
            ReadingStatus::Read => "Read",
        }
    }

    /// Record the choice; returns the notice to show.
    pub fn select(self, book_id: &str) -> String {
        info!(book_id, status = self.label(), "reading status set");
        format!("Reading status set to \"{}\".", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewField {
    Comment,
    Notes,
    FavoriteQuote,
    RecommendReason,
    ReadingReason,
}

impl ReviewField {
    pub const ALL: [ReviewField; 5] = [
        ReviewField::Comment,
        ReviewField::Notes,
        ReviewField::FavoriteQuote,
        ReviewField::RecommendReason,
        ReviewField::ReadingReason,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReviewField::Comment => "Comment",
            ReviewField::Notes => "My notes",
            ReviewField::FavoriteQuote => "Favorite quote",
            ReviewField::RecommendReason => "Why I'd recommend it",
            ReviewField::ReadingReason => "Why I read it",
        }
    }
}

/// Review form contents. Saving only logs; nothing is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
    pub notes: String,
    pub favorite_quote: String,
    pub recommend_reason: String,
    pub reading_reason: String,
}

impl ReviewDraft {
    pub fn field(&self, f: ReviewField) -> &str {
        match f {
            ReviewField::Comment => &self.comment,
            ReviewField::Notes => &self.notes,
            ReviewField::FavoriteQuote => &self.favorite_quote,
            ReviewField::RecommendReason => &self.recommend_reason,
            ReviewField::ReadingReason => &self.reading_reason,
        }
    }

    pub fn field_mut(&mut self, f: ReviewField) -> &mut String {
        match f {
            ReviewField::Comment => &mut self.comment,
            ReviewField::Notes => &mut self.notes,
            ReviewField::FavoriteQuote => &mut self.favorite_quote,
            ReviewField::RecommendReason => &mut self.recommend_reason,
            ReviewField::ReadingReason => &mut self.reading_reason,
        }
    }

    /// Trimmed copy of the draft, as it would be submitted.
    pub fn normalized(&self) -> ReviewDraft {
        ReviewDraft {
            rating: self.rating.min(crate::rating::MAX_STARS),
            comment: self.comment.trim().to_string(),
            notes: self.notes.trim().to_string(),
            favorite_quote: self.favorite_quote.trim().to_string(),
            recommend_reason: self.recommend_reason.trim().to_string(),
            reading_reason: self.reading_reason.trim().to_string(),
        }
    }

    pub fn save(&self, book_id: &str) -> String {
        let r = self.normalized();
        info!(
            book_id,
            rating = r.rating,
            comment = %r.comment,
            notes = %r.notes,
            favorite_quote = %r.favorite_quote,
            recommend_reason = %r.recommend_reason,
            reading_reason = %r.reading_reason,
            "saving review"
        );
        REVIEW_SAVED_NOTICE.to_string()
    }
}
