mod tests_end_document;
mod tests_ids;
mod tests_libraries;
