mod configure;
mod failures;
mod helpers;
mod login;
