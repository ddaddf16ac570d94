mod assembler;
mod format;
mod locator;
mod reader;
mod rewriter;
mod writer;

pub use assembler::{assemble, output_path_for, AssembledArchive};
pub use format::{base_name, EntryInfo, EntryMethod, JarMatcher};
pub use locator::{locate_jar, LocatedJar};
pub use reader::ArchiveReader;
pub use rewriter::{rewrite_jar, PatchedDescriptor, RewrittenJar};
pub use writer::ArchiveWriter;
