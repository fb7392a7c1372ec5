mod common;
mod venture_debt;
