//! Report messages written by the .NET analyzer.
//!
//! Field tags mirror the analyzer's `AnalyzerReport` schema and must not be
//! renumbered.

/// Wire encoding of a span: 1-based lines, 0-based offsets.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct TextRange {
    #[prost(int32, tag = "1")]
    pub start_line: i32,
    #[prost(int32, tag = "2")]
    pub end_line: i32,
    #[prost(int32, tag = "3")]
    pub start_offset: i32,
    #[prost(int32, tag = "4")]
    pub end_offset: i32,
}

/// All copy/paste tokens of one source file.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CopyPasteTokenInfo {
    #[prost(string, tag = "1")]
    pub file_path: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub token_info: ::prost::alloc::vec::Vec<copy_paste_token_info::TokenInfo>,
}

pub mod copy_paste_token_info {
    /// One normalized token and where it came from.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TokenInfo {
        #[prost(string, tag = "1")]
        pub token_value: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "2")]
        pub text_range: ::core::option::Option<super::TextRange>,
    }
}

pub use copy_paste_token_info::TokenInfo;

impl CopyPasteTokenInfo {
    /// Path extractor handed to the importer.
    pub fn path(&self) -> &str {
        &self.file_path
    }
}
