pub mod debtor;
pub mod pix;
