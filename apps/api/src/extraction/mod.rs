// Document text extraction: uploaded bytes → plain resume text.
// The handler validates the upload, the extractor seam produces the text,
// nothing is retained after the response.

pub mod document;
pub mod extractor;
pub mod handlers;
pub mod normalize;
