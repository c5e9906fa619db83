mod directory;
mod mutations;
mod queries;
mod reference;
mod workflows;
