mod analyze;
mod generate;
