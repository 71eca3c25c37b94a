mod observability;
mod speech;
