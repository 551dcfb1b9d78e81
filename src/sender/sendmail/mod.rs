pub mod sendmail;
pub use sendmail::Sendmail;
