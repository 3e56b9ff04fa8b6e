//! Captured 7-Zip output used by the fake binaries

/// `7z l -bb2` of a small archive
pub const LIST_OUTPUT: &str = "
7-Zip 23.01 (x64) : Copyright (c) 1999-2023 Igor Pavlov : 2023-06-20

Scanning the drive for archives:
1 file, 4096 bytes (4 KiB)

Listing archive: backup.7z

--
Path = backup.7z
Type = 7z
Physical Size = 4096
Headers Size = 198
Method = LZMA2:24
Solid = +
Blocks = 1

   Date      Time    Attr         Size   Compressed  Name
------------------- ----- ------------ ------------  ------------------------
2024-02-11 09:15:42 D....            0            0  photos
2024-02-11 09:15:40 ....A        10240         3898  photos/cat.jpg
2024-02-11 09:15:41 ....A          733               photos/notes.txt
------------------- ----- ------------ ------------  ------------------------
2024-02-11 09:15:42              10973         3898  2 files, 1 folders
";

/// `7z x -bb2` of the same archive
pub const EXTRACT_OUTPUT: &str = "
7-Zip 23.01 (x64) : Copyright (c) 1999-2023 Igor Pavlov : 2023-06-20

Scanning the drive for archives:
1 file, 4096 bytes (4 KiB)

Extracting archive: backup.7z
--
Path = backup.7z
Type = 7z
Physical Size = 4096

- photos
- photos/cat.jpg
- photos/notes.txt

Everything is Ok

Folders: 1
Files: 2
Size:       10973
Compressed: 4096
";

/// `7z u -bb2` updating two files
pub const UPDATE_OUTPUT: &str = "
7-Zip 23.01 (x64) : Copyright (c) 1999-2023 Igor Pavlov : 2023-06-20

Open archive: backup.7z
--
Path = backup.7z
Type = 7z

Scanning the drive:
2 files, 1200 bytes (2 KiB)

Updating archive: backup.7z

Items to compress: 2

U photos/notes.txt
U todo.md

Files read from disk: 2
Archive size: 4312 bytes (5 KiB)
Everything is Ok
";

/// `7z a -bb2` adding one file
pub const ADD_OUTPUT: &str = "
Scanning the drive:
1 file, 512 bytes (1 KiB)

Creating archive: new.7z

Items to compress: 1

+ readme.md

Files read from disk: 1
Archive size: 402 bytes (1 KiB)
Everything is Ok
";

/// stderr of a failed run
pub const DISK_FULL_STDERR: &str = "
ERRORS:
Error: disk full

";
